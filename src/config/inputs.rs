use std::path::{Path, PathBuf};

use super::ConfigView;
use crate::lib::paths;

/// Raw values available when a command starts, before any resolution.
///
/// Empty strings are normalised to "unset" so `--token ""` behaves like no flag.
#[derive(Debug, Clone)]
pub struct InvocationInputs {
    address: Option<String>,
    token: Option<String>,
    profile: Option<String>,
    token_file: Option<PathBuf>,
    config: ConfigView,
}

impl InvocationInputs {
    pub fn new(config: ConfigView) -> Self {
        Self {
            address: None,
            token: None,
            profile: None,
            token_file: None,
            config,
        }
    }

    pub fn with_address(mut self, address: Option<String>) -> Self {
        self.address = address.filter(|value| !value.is_empty());
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|value| !value.is_empty());
        self
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile.filter(|value| !value.is_empty());
        self
    }

    pub fn with_token_file(mut self, token_file: Option<PathBuf>) -> Self {
        self.token_file = token_file.filter(|path| paths::is_nonempty(path));
        self
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn profile_name(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn token_file(&self) -> Option<&Path> {
        self.token_file.as_deref()
    }

    pub fn config(&self) -> &ConfigView {
        &self.config
    }
}
