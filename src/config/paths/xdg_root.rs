//! XDG Base Directory utilities for configuration files.

use crate::error::ChecksumError;
use std::path::PathBuf;

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
/// Follows XDG Base Directory Specification
pub fn config_home() -> Result<PathBuf, ChecksumError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        ChecksumError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// Get the global config file path
///
/// Returns `$XDG_CONFIG_HOME/filesum/config.toml`. The file is not required to exist.
pub fn config_file_path() -> Result<PathBuf, ChecksumError> {
    Ok(config_home()?.join("filesum").join("config.toml"))
}
