//! Checksum algorithm identifiers.

use crate::error::ChecksumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named digest algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Md5,
    Sha256,
    Sha512,
    Blake3,
}

impl Algorithm {
    /// Every algorithm identifier known to this crate, in display order
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Md5,
        Algorithm::Sha256,
        Algorithm::Sha512,
        Algorithm::Blake3,
    ];

    /// Lowercase identifier used on the command line and in manifest file names
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
            Algorithm::Blake3 => "blake3",
        }
    }

    /// Digest length in bytes
    pub fn output_len(&self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha256 => 32,
            Algorithm::Sha512 => 64,
            Algorithm::Blake3 => 32,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.name() == normalized)
            .ok_or_else(|| ChecksumError::UnsupportedAlgorithm(s.to_string()))
    }
}
