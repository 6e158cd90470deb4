//! Configuration
//!
//! Layered configuration: built-in defaults, then the global config file, then
//! `FILESUM__*` environment variables. An explicit config file replaces the global file.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

fn default_algorithm() -> String {
    "sha256".to_string()
}

/// Defaults for checksum runs; CLI arguments take precedence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksumDefaults {
    /// Algorithm used when none is given on the command line
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Walk subdirectories
    #[serde(default)]
    pub recursive: bool,

    /// Append to existing manifests instead of rewriting them
    #[serde(default)]
    pub append: bool,

    /// Digest worker threads (sequential when unset)
    #[serde(default)]
    pub threads: Option<usize>,
}

impl Default for ChecksumDefaults {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            recursive: false,
            append: false,
            threads: None,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilesumConfig {
    #[serde(default)]
    pub checksum: ChecksumDefaults,

    #[serde(default)]
    pub logging: LoggingConfig,
}
