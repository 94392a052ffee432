//! API client construction from a resolved address/token pair.
//!
//! This is the boundary to the transport: it validates what a client needs to
//! talk to a cluster and hands back a configured [`ApiClient`]. No requests are
//! made here.
use crate::{config::ResolvedConfig, lib::errors::ClientError};

/// User agent sent by clients built here.
pub const DEFAULT_USER_AGENT: &str = concat!("humioctl/", env!("CARGO_PKG_VERSION"));

/// Settings an API client is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub address: String,
    pub token: String,
    pub user_agent: String,
    /// Skip TLS certificate verification.
    pub insecure: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            token: String::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            insecure: false,
        }
    }
}

/// Adjusts a [`ClientConfig`] after the resolved values are applied.
pub type ClientOption = Box<dyn FnOnce(&mut ClientConfig)>;

/// A validated client handle passed to subcommands.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    base_url: String,
}

impl ApiClient {
    /// Validate `config` and build a client. The token may be empty; commands
    /// that need one call [`ApiClient::require_token`].
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = normalize_address(&config.address)?;
        Ok(Self { config, base_url })
    }

    /// Cluster address, always ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        Some(self.config.token.as_str()).filter(|token| !token.is_empty())
    }

    pub fn require_token(&self) -> Result<&str, ClientError> {
        self.token().ok_or(ClientError::MissingToken)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Build a client from resolved values, then apply `options` in order.
pub fn new_api_client(
    resolved: ResolvedConfig,
    options: impl IntoIterator<Item = ClientOption>,
) -> Result<ApiClient, ClientError> {
    let (address, token) = resolved.into_parts();
    let mut config = ClientConfig {
        address,
        token,
        ..ClientConfig::default()
    };
    for option in options {
        option(&mut config);
    }
    ApiClient::new(config)
}

fn normalize_address(address: &str) -> Result<String, ClientError> {
    if address.trim().is_empty() {
        return Err(ClientError::MissingAddress);
    }

    let rest = address
        .strip_prefix("https://")
        .or_else(|| address.strip_prefix("http://"))
        .ok_or_else(|| ClientError::InvalidAddress {
            address: address.to_string(),
            reason: "must start with http:// or https://",
        })?;
    if rest.is_empty() || rest.starts_with('/') || rest.chars().any(char::is_whitespace) {
        return Err(ClientError::InvalidAddress {
            address: address.to_string(),
            reason: "missing or malformed host",
        });
    }

    if address.ends_with('/') {
        Ok(address.to_string())
    } else {
        Ok(format!("{address}/"))
    }
}
