use std::{io, path::PathBuf, string::FromUtf8Error};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors raised while reading the persisted config file and environment layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be parsed.
    #[error("Failed to parse configuration file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// The config file exists but could not be read (permissions, a directory, ...).
    #[error("Failed to read configuration file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Environment variables could not be collected.
    #[error("Failed to read HUMIO_* environment variables: {source}")]
    Environment {
        #[source]
        source: ConfigLoaderError,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Corrupt { path, source }
    }
}

/// Why the bytes of a profile store could not be turned into profiles.
#[derive(Debug, Error)]
pub enum ProfileDecodeError {
    #[error("contents are not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Errors raised by the persisted profile store.
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("Profile `{name}` was not found in {path}")]
    NotFound { name: String, path: PathBuf },
    #[error("Profile store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: ProfileDecodeError,
    },
    #[error("Failed to read profile store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write profile store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode profile store {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },
    #[error("Invalid profile name `{name}`: {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("Could not determine the home directory for the profile store")]
    HomeDirUnavailable,
}

/// Failure to read the file named by `--token-file`.
#[derive(Debug, Error)]
#[error("Failed to read token file {path}: {source}")]
pub struct TokenFileError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Every fatal condition of address/token resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    TokenFileUnreadable(#[from] TokenFileError),
    #[error(transparent)]
    Profile(#[from] ProfileStoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ResolveError {
    /// True when resolution stopped because the selected profile does not exist.
    pub fn is_profile_not_found(&self) -> bool {
        matches!(self, ResolveError::Profile(ProfileStoreError::NotFound { .. }))
    }
}

/// Errors returned by the API client factory.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("No Humio address configured; pass --address, set HUMIO_ADDRESS or select a profile")]
    MissingAddress,
    #[error("Invalid Humio address `{address}`: {reason}")]
    InvalidAddress {
        address: String,
        reason: &'static str,
    },
    #[error("No API token configured; pass --token or --token-file, set HUMIO_TOKEN or select a profile")]
    MissingToken,
}
