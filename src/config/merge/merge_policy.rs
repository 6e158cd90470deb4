//! Built-in defaults seeded into every config builder.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the default checksum and logging settings.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("checksum.algorithm", "sha256")?
        .set_default("checksum.recursive", false)?
        .set_default("checksum.append", false)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("logging.color", true)
}
