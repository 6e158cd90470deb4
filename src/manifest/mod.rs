//! Checksum Manifests
//!
//! A manifest is a hidden sidecar file, one per (directory, algorithm) pair, recording the
//! digest of every file already checksummed in that directory. For `sha256` in `/data`
//! the manifest is `/data/.sha256.checksum`.

pub mod store;

pub use store::{FsManifestStore, ManifestStore};

use crate::digest::Algorithm;
use std::path::{Path, PathBuf};

/// Manifest file extension, without the leading dot
pub const CHECKSUM_EXTENSION: &str = "checksum";

/// Field delimiter used in manifest files
pub const DELIMITER: char = '|';

/// Column holding the recorded file path
pub const FILE_COLUMN: &str = "file";

/// Column holding the lowercase hex digest
pub const CHECKSUM_COLUMN: &str = "checksum";

/// Identity of a manifest: which directory it describes and which algorithm it records
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManifestIdentity {
    pub directory: PathBuf,
    pub algorithm: Algorithm,
}

impl ManifestIdentity {
    pub fn new(directory: impl Into<PathBuf>, algorithm: Algorithm) -> Self {
        Self {
            directory: directory.into(),
            algorithm,
        }
    }

    /// Manifest file name, e.g. `.md5.checksum`
    pub fn file_name(&self) -> String {
        manifest_file_name(self.algorithm)
    }

    /// Full manifest path inside `directory`
    pub fn path(&self) -> PathBuf {
        self.directory.join(self.file_name())
    }
}

pub fn manifest_file_name(algorithm: Algorithm) -> String {
    format!(".{}.{}", algorithm.name(), CHECKSUM_EXTENSION)
}

/// Whether `path` names a manifest file of any algorithm.
///
/// Matches hidden files of the form `.<name>.checksum` with a non-empty `<name>`.
pub fn is_manifest_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    name.strip_prefix('.')
        .and_then(|rest| rest.strip_suffix(CHECKSUM_EXTENSION))
        .and_then(|rest| rest.strip_suffix('.'))
        .map(|stem| !stem.is_empty())
        .unwrap_or(false)
}
