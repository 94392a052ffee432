use std::path::Path;

use tracing::{debug, warn};

use super::{ValueSource, ENV_PREFIX};

pub fn log_file_source(path: &Path) {
    debug!(
        target: "humioctl::config",
        path = %path.display(),
        exists = path.exists(),
        env_prefix = ENV_PREFIX,
        "Loading configuration file"
    );
}

pub fn log_home_unavailable() {
    warn!(
        target: "humioctl::config",
        "Home directory unknown; reading configuration from HUMIO_* environment variables only"
    );
}

/// Tokens are never logged, only where they came from.
pub fn log_resolved(address_source: ValueSource, token_source: ValueSource, token_set: bool) {
    debug!(
        target: "humioctl::resolve",
        address_source = address_source.as_str(),
        token_source = token_source.as_str(),
        token_set,
        "Resolved address and token"
    );
}
