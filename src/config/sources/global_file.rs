//! Global config file source: $XDG_CONFIG_HOME/filesum/config.toml (optional)

use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};

/// Add the global config file to builder when a config home can be determined.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match xdg::config_file_path() {
        Ok(path) => Ok(builder.add_source(File::from(path.as_path()).required(false))),
        Err(e) => {
            tracing::debug!("Skipping global config file: {}", e);
            Ok(builder)
        }
    }
}
