//! Core types for checksum runs.

use crate::digest::Algorithm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Digest bytes; length is fixed by the algorithm that produced them
pub type Digest = Vec<u8>;

/// Manifest write policy, applied to every manifest touched by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Discard prior manifest content and write exactly this run's records
    Truncate,
    /// Keep prior entries and add only files not already recorded
    Append,
}

impl WriteMode {
    pub fn from_append(append: bool) -> Self {
        if append {
            WriteMode::Append
        } else {
            WriteMode::Truncate
        }
    }

    pub fn is_append(&self) -> bool {
        matches!(self, WriteMode::Append)
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Truncate => f.write_str("truncate"),
            WriteMode::Append => f.write_str("append"),
        }
    }
}

/// Digest of one file, produced once and written once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumRecord {
    file_path: PathBuf,
    digest: Digest,
    algorithm: Algorithm,
}

impl ChecksumRecord {
    pub fn new(file_path: PathBuf, digest: Digest, algorithm: Algorithm) -> Self {
        Self {
            file_path,
            digest,
            algorithm,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Path as written to the manifest `file` column; `None` when it is not valid UTF-8
    pub fn file_str(&self) -> Option<&str> {
        self.file_path.to_str()
    }

    /// Lowercase hex digest as written to the manifest `checksum` column
    pub fn hex_digest(&self) -> String {
        hex::encode(&self.digest)
    }

    /// Directory holding the file; empty for a bare relative file name
    pub fn directory(&self) -> PathBuf {
        parent_directory(&self.file_path)
    }
}

/// Containing directory of a path, with `""` standing for the current directory
pub fn parent_directory(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
