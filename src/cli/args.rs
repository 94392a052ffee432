//! CLI argument definitions.
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::validate_profile_name;

/// Top-level optional CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Show the resolved address and token and where each came from.
    #[command(about = "Show the resolved address and token sources")]
    Config,
    /// Manage named address/token profiles.
    #[command(about = "Manage named address/token profiles")]
    Profiles(ProfilesArgs),
}

/// `profiles` command container.
#[derive(Debug, Clone, Args)]
#[command(
    about = "Manage named address/token profiles",
    long_about = "Manage named address/token profiles.\n\nSubcommands:\n  add     Save a profile from --address and --token/--token-file.\n  list    List saved profiles.\n  show    Show one profile.\n  remove  Delete a profile.",
    after_help = "Hint: select a saved profile for any command with `humioctl --profile <NAME> ...`."
)]
pub struct ProfilesArgs {
    #[command(subcommand)]
    pub command: ProfilesCommand,
}

/// Profile management subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ProfilesCommand {
    /// Save a profile (replaces an existing one with the same name).
    Add(ProfileNameArgs),
    /// List saved profiles.
    List,
    /// Show one profile.
    Show(ProfileNameArgs),
    /// Delete a profile.
    Remove(ProfileNameArgs),
}

/// Arguments naming a single profile.
#[derive(Debug, Clone, Args)]
pub struct ProfileNameArgs {
    /// Profile name.
    pub name: String,
}

/// Flags accepted by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// The HTTP address of the Humio cluster. Overrides the value in your config file.
    #[arg(short = 'a', long, global = true)]
    pub address: Option<String>,
    /// The API token to use when talking to Humio. Overrides the value in your config file.
    #[arg(short = 't', long, global = true)]
    pub token: Option<String>,
    /// File containing the API token. Overrides the config file and --token.
    #[arg(long = "token-file", global = true)]
    pub token_file: Option<PathBuf>,
    /// Name of the profile to use.
    #[arg(short = 'u', long, global = true)]
    pub profile: Option<String>,
    /// Config file (default is $HOME/.humio/config.yaml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "humioctl",
    author,
    version,
    about = "A management CLI for Humio.",
    long_about = None,
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Print version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),
    #[command(flatten)]
    pub global: GlobalArgs,
    /// Optional command.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl CliArgs {
    /// Reject argument combinations clap cannot express.
    pub fn validate(&self) -> Result<()> {
        if let Some(CliCommand::Profiles(profiles)) = &self.command {
            match &profiles.command {
                ProfilesCommand::Add(args) => {
                    validate_profile_name(&args.name).map_err(|err| anyhow!(err))?;
                    if self.global.address.as_deref().unwrap_or_default().is_empty() {
                        return Err(anyhow!("`profiles add` requires --address"));
                    }
                    if self.global.token.as_deref().unwrap_or_default().is_empty()
                        && self.global.token_file.is_none()
                    {
                        return Err(anyhow!("`profiles add` requires --token or --token-file"));
                    }
                }
                ProfilesCommand::List
                | ProfilesCommand::Show(_)
                | ProfilesCommand::Remove(_) => {}
            }
        }

        Ok(())
    }
}
