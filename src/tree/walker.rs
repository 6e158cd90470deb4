//! Candidate file enumeration
//!
//! Lists the files under a root that are eligible for checksumming: directories and
//! manifest files of any algorithm are never candidates.

use crate::error::ChecksumError;
use crate::manifest::is_manifest_file;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Walk the full subtree instead of only the root's immediate children
    pub recursive: bool,
}

impl WalkerConfig {
    pub fn recursive(recursive: bool) -> Self {
        Self { recursive }
    }
}

/// List candidate files under `root`.
///
/// A regular-file root yields itself. Entries are returned in file-name order within each
/// directory, so repeated walks over an unchanged tree agree. A candidate whose path is not
/// valid UTF-8 fails the walk: manifests record paths as text.
pub fn list_files(root: &Path, config: &WalkerConfig) -> Result<Vec<PathBuf>, ChecksumError> {
    if root.is_file() {
        ensure_utf8(root)?;
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.is_dir() {
        return Err(ChecksumError::ConfigError(format!(
            "{} is neither a file nor a directory",
            root.display()
        )));
    }

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            ChecksumError::Enumeration { path, source: e }
        })?;
        let path = entry.path();

        // Symlinks to directories are directories too.
        if entry.file_type().is_dir() || path.is_dir() {
            continue;
        }
        if is_manifest_file(path) {
            trace!(path = %path.display(), "Skipping manifest file");
            continue;
        }
        ensure_utf8(path)?;
        files.push(entry.into_path());
    }

    debug!(
        root = %root.display(),
        recursive = config.recursive,
        candidates = files.len(),
        "Enumerated candidate files"
    );
    Ok(files)
}

fn ensure_utf8(path: &Path) -> Result<(), ChecksumError> {
    match path.to_str() {
        Some(_) => Ok(()),
        None => Err(ChecksumError::NonUtf8Path {
            path: path.to_path_buf(),
        }),
    }
}
