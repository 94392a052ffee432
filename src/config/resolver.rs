//! Address/token resolution.
//!
//! Each field is resolved independently, highest precedence first:
//!
//! 1. `--token-file` contents (token only, beats `--token` too)
//! 2. `--address` / `--token`
//! 3. the profile selected with `--profile`
//! 4. `HUMIO_*` environment, then the config file
//!
//! A field nothing resolves stays empty; rejecting that is up to the client factory.
use serde::Serialize;

use super::{
    telemetry, ConfigLayer, ConfigView, InvocationInputs, ProfileLookup, ADDRESS_KEY, TOKEN_KEY,
};
use crate::lib::{errors::ResolveError, fs::read_token_file};

/// Final address and token for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    address: String,
    token: String,
}

impl ResolvedConfig {
    pub fn new(address: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            token: token.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_empty(&self) -> bool {
        self.address.is_empty() && self.token.is_empty()
    }

    pub fn into_parts(self) -> (String, String) {
        (self.address, self.token)
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    TokenFile,
    Flag,
    Profile,
    Environment,
    ConfigFile,
    Unset,
}

impl ValueSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueSource::TokenFile => "token_file",
            ValueSource::Flag => "flag",
            ValueSource::Profile => "profile",
            ValueSource::Environment => "environment",
            ValueSource::ConfigFile => "config_file",
            ValueSource::Unset => "unset",
        }
    }
}

impl From<ConfigLayer> for ValueSource {
    fn from(layer: ConfigLayer) -> Self {
        match layer {
            ConfigLayer::Environment => ValueSource::Environment,
            ConfigLayer::File => ValueSource::ConfigFile,
        }
    }
}

/// Resolved values plus their provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub config: ResolvedConfig,
    pub address_source: ValueSource,
    pub token_source: ValueSource,
}

/// Resolve the address and token for one invocation.
///
/// Performs at most one profile lookup and one token-file read. Neither the
/// profile source nor the config view is modified.
pub fn resolve(
    inputs: &InvocationInputs,
    profiles: &impl ProfileLookup,
) -> Result<Resolution, ResolveError> {
    let profile = match inputs.profile_name() {
        Some(name) => Some(profiles.lookup(name)?),
        None => None,
    };

    let (address, address_source) = resolve_field(
        ADDRESS_KEY,
        inputs.address(),
        profile.as_ref().map(|p| p.address.as_str()),
        inputs.config(),
    );
    let (token, token_source) = match inputs.token_file() {
        Some(path) => (read_token_file(path)?, ValueSource::TokenFile),
        None => resolve_field(
            TOKEN_KEY,
            inputs.token(),
            profile.as_ref().map(|p| p.token.as_str()),
            inputs.config(),
        ),
    };

    telemetry::log_resolved(address_source, token_source, !token.is_empty());
    Ok(Resolution {
        config: ResolvedConfig { address, token },
        address_source,
        token_source,
    })
}

/// A selected profile answers for the field even when its stored value is empty.
fn resolve_field(
    key: &str,
    flag: Option<&str>,
    profile: Option<&str>,
    config: &ConfigView,
) -> (String, ValueSource) {
    if let Some(value) = flag {
        return (value.to_string(), ValueSource::Flag);
    }
    if let Some(value) = profile {
        return (value.to_string(), ValueSource::Profile);
    }
    match config.lookup(key) {
        Some((value, layer)) => (value, layer.into()),
        None => (String::new(), ValueSource::Unset),
    }
}
