//! Error types for checksum runs and the record codec.

use crate::digest::Algorithm;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the delimited-record codec
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Errors produced by a checksum run
///
/// Every variant is fatal to the run; nothing is retried.
#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unsupported checksum algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Failed to enumerate files under {}: {source}", path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to compute {algorithm} digest of {}: {source}", path.display())]
    Digest {
        path: PathBuf,
        algorithm: Algorithm,
        #[source]
        source: std::io::Error,
    },

    #[error("Path is not valid UTF-8 and cannot be recorded: {}", path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("Malformed manifest {}: {reason}", path.display())]
    ManifestDecode { path: PathBuf, reason: String },

    #[error("Failed to write manifest {}: {source}", path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

impl ChecksumError {
    /// True for failures detected before any enumeration or digesting
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ChecksumError::ConfigError(_) | ChecksumError::UnsupportedAlgorithm(_)
        )
    }
}

impl From<config::ConfigError> for ChecksumError {
    fn from(err: config::ConfigError) -> Self {
        ChecksumError::ConfigError(err.to_string())
    }
}
