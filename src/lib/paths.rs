//! Per-user locations of the config file and profile store.

use std::path::{Path, PathBuf};

/// Directory under the home directory holding all humioctl state.
pub const APP_DIR_NAME: &str = ".humio";
/// Default config file name inside [`APP_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.yaml";
/// Profile store file name inside [`APP_DIR_NAME`].
pub const PROFILES_FILE_NAME: &str = "profiles.toml";

/// `<home>/.humio`, or `None` when the home directory is unknown.
pub fn app_dir() -> Option<PathBuf> {
    app_dir_from(dirs::home_dir())
}

/// Testable helper for [`app_dir`].
pub fn app_dir_from(home: Option<PathBuf>) -> Option<PathBuf> {
    home.map(|home| home.join(APP_DIR_NAME))
}

/// `<home>/.humio/config.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// `<home>/.humio/profiles.toml`.
pub fn default_profiles_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(PROFILES_FILE_NAME))
}

/// Returns true if the path is non-empty.
pub fn is_nonempty(path: &Path) -> bool {
    !path.as_os_str().is_empty()
}
