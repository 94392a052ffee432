//! Read-only view over `HUMIO_*` environment variables and the persisted config file.
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use config::{Environment, File, FileFormat};
use tracing::{debug, error, warn};

use crate::lib::{errors::ConfigError, fs, paths};

pub mod inputs;
pub mod profiles;
pub mod resolver;
pub mod telemetry;

pub use inputs::InvocationInputs;
pub use profiles::{
    validate_profile_name, Profile, ProfileLookup, ProfileRemoveStatus, ProfileStore,
};
pub use resolver::{resolve, Resolution, ResolvedConfig, ValueSource};

/// Prefix shared by every environment variable the view recognises.
pub const ENV_PREFIX: &str = "HUMIO";
/// Key holding the cluster address.
pub const ADDRESS_KEY: &str = "address";
/// Key holding the API token.
pub const TOKEN_KEY: &str = "token";

/// Which layer of a [`ConfigView`] answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayer {
    Environment,
    File,
}

/// Environment values overlaid on the persisted config file.
#[derive(Debug, Clone)]
pub struct ConfigView {
    environment: config::Config,
    file: config::Config,
    source_path: Option<PathBuf>,
}

impl ConfigView {
    /// Load the config file (`--config` override or the per-user default) and
    /// the process environment.
    pub fn load(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(override_path, None)
    }

    /// Same as [`ConfigView::load`], reading environment values from `env`
    /// instead of the process when provided. Keys keep their `HUMIO_` prefix.
    pub fn load_with_env(
        override_path: Option<PathBuf>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let source_path = resolve_config_path(override_path);
        let file = match &source_path {
            Some(path) => load_file_layer(path)?,
            None => {
                telemetry::log_home_unavailable();
                config::Config::default()
            }
        };
        let env = env.unwrap_or_else(|| environment_from(std::env::vars_os()));
        let environment = load_environment_layer(env)?;

        Ok(Self {
            environment,
            file,
            source_path,
        })
    }

    /// A view with no values in either layer.
    pub fn empty() -> Self {
        Self {
            environment: config::Config::default(),
            file: config::Config::default(),
            source_path: None,
        }
    }

    /// Look up `key`, environment first, then file.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lookup(key).map(|(value, _)| value)
    }

    /// Like [`ConfigView::get`] but also reports which layer answered.
    pub fn lookup(&self, key: &str) -> Option<(String, ConfigLayer)> {
        if let Some(value) = string_value(&self.environment, key) {
            return Some((value, ConfigLayer::Environment));
        }
        string_value(&self.file, key).map(|value| (value, ConfigLayer::File))
    }

    /// Config file consulted for the file layer, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}

/// Resolve the config path in the order: CLI override → `<home>/.humio/config.yaml`.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path
        .filter(|path| paths::is_nonempty(path))
        .or_else(paths::default_config_path)
}

fn load_file_layer(path: &Path) -> Result<config::Config, ConfigError> {
    telemetry::log_file_source(path);
    read_file_layer(path).map_err(|error| {
        error!(
            target: "humioctl::config",
            path = %path.display(),
            reason = %error,
            "Failed to load configuration file"
        );
        error
    })
}

/// An absent file is an empty layer; anything present must read and parse.
fn read_file_layer(path: &Path) -> Result<config::Config, ConfigError> {
    let bytes = match fs::read_optional(path) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Ok(config::Config::default()),
        Err(source) => {
            return Err(ConfigError::Unreadable {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let contents = String::from_utf8(bytes).map_err(|err| {
        ConfigError::from_parse_error(
            path.to_path_buf(),
            config::ConfigError::Foreign(Box::new(err)),
        )
    })?;

    config::Config::builder()
        .add_source(File::from_str(&contents, file_format_for(path)))
        .build()
        .map_err(|err| ConfigError::from_parse_error(path.to_path_buf(), err))
}

/// Collect `HUMIO_*` variables, skipping anything that is not valid UTF-8.
fn environment_from(
    vars: impl IntoIterator<Item = (OsString, OsString)>,
) -> config::Map<String, String> {
    let prefix = format!("{ENV_PREFIX}_");
    vars.into_iter()
        .filter_map(|(key, value)| {
            let key = key.into_string().ok()?;
            if !key.starts_with(&prefix) {
                return None;
            }
            match value.into_string() {
                Ok(value) => Some((key, value)),
                Err(_) => {
                    warn!(
                        target: "humioctl::config",
                        key = %key,
                        "Ignoring environment variable that is not valid UTF-8"
                    );
                    None
                }
            }
        })
        .collect()
}

fn load_environment_layer(
    env: config::Map<String, String>,
) -> Result<config::Config, ConfigError> {
    let environment = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .ignore_empty(true)
        .source(Some(env));

    config::Config::builder()
        .add_source(environment)
        .build()
        .map_err(|source| ConfigError::Environment { source })
}

/// `.toml` and `.json` are honoured; anything else is read as YAML.
fn file_format_for(path: &Path) -> FileFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => FileFormat::Toml,
        Some("json") => FileFormat::Json,
        _ => FileFormat::Yaml,
    }
}

fn string_value(layer: &config::Config, key: &str) -> Option<String> {
    match layer.get_string(key) {
        Ok(value) => Some(value),
        Err(config::ConfigError::NotFound(_)) => None,
        Err(err) => {
            debug!(
                target: "humioctl::config",
                key,
                reason = %err,
                "Ignoring non-string configuration value"
            );
            None
        }
    }
}
