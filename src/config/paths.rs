//! XDG path helpers.

use directories::BaseDirs;
use std::env;
use std::path::PathBuf;

/// Directory name under the XDG config home
pub const APP_DIR: &str = "ctxstore";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `$XDG_CONFIG_HOME`, else `$HOME/.config`, else the platform config dir.
pub fn xdg_config_home() -> Option<PathBuf> {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    if let Some(home) = env::var_os("HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(home).join(".config"));
    }
    BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn config_dir() -> Option<PathBuf> {
    xdg_config_home().map(|dir| dir.join(APP_DIR))
}

pub fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Store root used when `store.root` is not configured
pub fn default_store_root() -> Option<PathBuf> {
    config_dir()
}
