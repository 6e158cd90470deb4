//! Environment variable source: FILESUM_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses FILESUM_ prefix and __ as separator for nested keys, e.g.
/// `FILESUM__CHECKSUM__ALGORITHM=md5`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("FILESUM")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
