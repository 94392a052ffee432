//! CLI entrypoint module structure.
use anyhow::{anyhow, Context, Result};
use clap::CommandFactory;
use serde_json::json;

use crate::{
    client::{new_api_client, ApiClient},
    config::{Profile, ProfileRemoveStatus, ProfileStore},
    lib::{errors::ClientError, fs::read_token_file},
};

pub mod args;
pub mod exit;
pub mod invocation;

pub use args::{CliArgs, CliCommand, GlobalArgs, ProfileNameArgs, ProfilesArgs, ProfilesCommand};
pub use exit::CliExit;
pub use invocation::resolve_inputs;

/// Printed when neither an address nor a token could be resolved.
pub const WELCOME_TEXT: &str = "\
Welcome to humioctl, a management CLI for Humio.

No address or token is configured yet. Save a profile with:

  $ humioctl profiles add <NAME> --address https://cloud.humio.com --token <TOKEN>

and select it with `humioctl --profile <NAME> ...`, or set HUMIO_ADDRESS and
HUMIO_TOKEN, or write them to $HOME/.humio/config.yaml.";

/// Characters of a token kept visible when masking it for display.
const VISIBLE_TOKEN_SUFFIX: usize = 4;

/// Execute the parsed command line and return the text to print.
pub fn execute(args: CliArgs) -> Result<String> {
    args.validate()?;
    match args.command {
        None => execute_root(&args.global),
        Some(CliCommand::Config) => execute_config(&args.global),
        Some(CliCommand::Profiles(profiles)) => {
            let store = ProfileStore::open_default()?;
            execute_profiles(&store, &args.global, profiles.command)
        }
    }
}

/// Welcome text when nothing is configured, help otherwise.
fn execute_root(global: &GlobalArgs) -> Result<String> {
    let resolution = global.resolve()?;
    if resolution.config.is_empty() {
        return Ok(WELCOME_TEXT.to_string());
    }
    Ok(CliArgs::command().render_help().to_string())
}

/// Resolve, build the client, and report where each value came from.
fn execute_config(global: &GlobalArgs) -> Result<String> {
    let inputs = global.invocation_inputs()?;
    let resolution = resolve_inputs(&inputs)?;
    let source_path = inputs
        .config()
        .source_path()
        .map(|path| path.display().to_string());
    let payload_token = mask_token(resolution.config.token());
    let address = resolution.config.address().to_string();

    let client = match new_api_client(resolution.config, Vec::new()) {
        Ok(client) => client_status(&client),
        Err(err) => err.to_string(),
    };

    let payload = json!({
        "address": address,
        "token": payload_token,
        "address_source": resolution.address_source,
        "token_source": resolution.token_source,
        "config_file": source_path,
        "client": client,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

fn client_status(client: &ApiClient) -> String {
    match client.require_token() {
        Ok(_) => "ready".to_string(),
        Err(ClientError::MissingToken) => "ready (no token)".to_string(),
        Err(err) => err.to_string(),
    }
}

/// Execute a `profiles` subcommand against `store`.
pub fn execute_profiles(
    store: &ProfileStore,
    global: &GlobalArgs,
    command: ProfilesCommand,
) -> Result<String> {
    match command {
        ProfilesCommand::Add(args) => {
            let profile = profile_from_flags(args.name, global)?;
            store
                .save(&profile)
                .with_context(|| format!("failed to save profile `{}`", profile.name))?;
            let payload = json!({
                "status": "saved",
                "profile": profile_payload(&profile),
                "store": store.path().display().to_string(),
            });
            Ok(serde_json::to_string_pretty(&payload)?)
        }
        ProfilesCommand::List => {
            let profiles = store.list()?;
            let payload: Vec<_> = profiles.iter().map(profile_payload).collect();
            Ok(serde_json::to_string_pretty(&payload)?)
        }
        ProfilesCommand::Show(args) => {
            let profile = store.load(&args.name)?;
            Ok(serde_json::to_string_pretty(&profile_payload(&profile))?)
        }
        ProfilesCommand::Remove(args) => {
            let status = match store.delete(&args.name)? {
                ProfileRemoveStatus::Removed => "removed",
                ProfileRemoveStatus::NotFound => "not_found",
            };
            let payload = json!({
                "status": status,
                "name": args.name,
                "store": store.path().display().to_string(),
            });
            Ok(serde_json::to_string_pretty(&payload)?)
        }
    }
}

/// A new profile takes its values from the explicit flags only.
fn profile_from_flags(name: String, global: &GlobalArgs) -> Result<Profile> {
    let address = global
        .address
        .clone()
        .filter(|address| !address.is_empty())
        .ok_or_else(|| anyhow!("`profiles add` requires --address"))?;
    let token = match (&global.token_file, &global.token) {
        (Some(path), _) => read_token_file(path)?,
        (None, Some(token)) => token.clone(),
        (None, None) => return Err(anyhow!("`profiles add` requires --token or --token-file")),
    };

    Ok(Profile {
        name,
        address,
        token,
    })
}

fn profile_payload(profile: &Profile) -> serde_json::Value {
    json!({
        "name": profile.name,
        "address": profile.address,
        "token": mask_token(&profile.token),
    })
}

/// Mask a token for display, keeping a short suffix of long tokens.
pub fn mask_token(token: &str) -> String {
    let length = token.chars().count();
    if length == 0 {
        return String::new();
    }
    if length <= VISIBLE_TOKEN_SUFFIX * 3 {
        return "*".repeat(length);
    }
    let suffix: String = token.chars().skip(length - VISIBLE_TOKEN_SUFFIX).collect();
    format!("{}{suffix}", "*".repeat(length - VISIBLE_TOKEN_SUFFIX))
}
