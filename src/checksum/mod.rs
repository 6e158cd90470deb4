//! Checksum Orchestrator
//!
//! Runs the pipeline Validate → Enumerate → Filter → Digest → Group → Persist. In append
//! mode each directory's manifest is consulted so already-recorded files are skipped
//! entirely; in truncate mode every candidate is digested and each manifest is rewritten.
//!
//! Any failure aborts the run. Manifests written before the failure are kept as written;
//! there is no rollback across directories.

pub mod format;
pub mod report;

pub use format::{format_algorithms_text, format_report_text};
pub use report::{ChecksumReport, ManifestSummary};

use crate::digest::{Algorithm, DigestFunction, DigestRegistry};
use crate::error::ChecksumError;
use crate::manifest::{is_manifest_file, FsManifestStore, ManifestIdentity, ManifestStore};
use crate::tree::{list_files, WalkerConfig};
use crate::types::{parent_directory, ChecksumRecord, WriteMode};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Parameters of a single run
#[derive(Debug, Clone)]
pub struct ChecksumRequest {
    pub root: PathBuf,
    pub algorithm: Algorithm,
    pub recursive: bool,
    pub mode: WriteMode,
    /// Digest worker threads; `None` or 1 digests sequentially
    pub threads: Option<usize>,
}

impl ChecksumRequest {
    pub fn new(root: impl Into<PathBuf>, algorithm: Algorithm) -> Self {
        Self {
            root: root.into(),
            algorithm,
            recursive: false,
            mode: WriteMode::Truncate,
            threads: None,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }
}

/// Candidates left after consulting the manifests
struct FilteredCandidates {
    pending: Vec<PathBuf>,
    skipped: usize,
}

/// Coordinates enumeration, filtering, digesting, and manifest writes
pub struct ChecksumOrchestrator {
    registry: DigestRegistry,
    store: Arc<dyn ManifestStore>,
}

impl Default for ChecksumOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChecksumOrchestrator {
    /// Orchestrator with every built-in algorithm and the filesystem manifest store
    pub fn new() -> Self {
        Self::with_parts(DigestRegistry::with_defaults(), Arc::new(FsManifestStore::new()))
    }

    pub fn with_parts(registry: DigestRegistry, store: Arc<dyn ManifestStore>) -> Self {
        Self { registry, store }
    }

    pub fn registry(&self) -> &DigestRegistry {
        &self.registry
    }

    pub fn run(&self, request: &ChecksumRequest) -> Result<ChecksumReport, ChecksumError> {
        let started = Instant::now();
        let digest = self.validate(request)?;
        info!(
            root = %request.root.display(),
            algorithm = %request.algorithm,
            mode = %request.mode,
            recursive = request.recursive,
            "Starting checksum run"
        );

        let candidates = list_files(&request.root, &WalkerConfig::recursive(request.recursive))?;
        let filtered = self.filter_recorded(&candidates, request)?;
        let records = digest_files(&filtered.pending, digest, request.threads)?;
        let digested = records.len();
        let groups = group_records(records);

        let mut manifests = Vec::with_capacity(groups.len());
        for (identity, records) in &groups {
            if records.is_empty() {
                continue;
            }
            let written = self.store.write(identity, records, request.mode)?;
            manifests.push(ManifestSummary {
                path: identity.path(),
                records: written,
            });
        }

        let report = ChecksumReport {
            root: request.root.clone(),
            algorithm: request.algorithm,
            mode: request.mode,
            recursive: request.recursive,
            candidates: candidates.len(),
            skipped: filtered.skipped,
            digested,
            manifests,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            candidates = report.candidates,
            skipped = report.skipped,
            digested = report.digested,
            manifests = report.manifests.len(),
            duration_ms = report.duration_ms,
            "Checksum run complete"
        );
        Ok(report)
    }

    /// Check preconditions before any enumeration or digesting
    fn validate(&self, request: &ChecksumRequest) -> Result<DigestFunction, ChecksumError> {
        let digest = self.registry.resolve(request.algorithm)?;

        let root = &request.root;
        if !root.exists() {
            return Err(ChecksumError::ConfigError(format!(
                "File {} is not found",
                root.display()
            )));
        }
        if !root.is_file() && !root.is_dir() {
            return Err(ChecksumError::ConfigError(format!(
                "{} is neither a regular file nor a directory",
                root.display()
            )));
        }
        if root.is_file() && is_manifest_file(root) {
            return Err(ChecksumError::ConfigError(format!(
                "{} is a checksum manifest and cannot be checksummed",
                root.display()
            )));
        }

        let readable = if root.is_file() {
            File::open(root).map(drop)
        } else {
            fs::read_dir(root).map(drop)
        };
        readable.map_err(|e| {
            ChecksumError::ConfigError(format!("{} is not readable: {}", root.display(), e))
        })?;
        Ok(digest)
    }

    /// Drop candidates already recorded in their directory's manifest.
    ///
    /// Manifests are only read in append mode; truncate mode digests everything.
    fn filter_recorded(
        &self,
        candidates: &[PathBuf],
        request: &ChecksumRequest,
    ) -> Result<FilteredCandidates, ChecksumError> {
        let mut recorded_by_directory: HashMap<PathBuf, HashSet<String>> = HashMap::new();
        let mut pending = Vec::with_capacity(candidates.len());
        let mut skipped = 0usize;

        for file in candidates {
            let directory = parent_directory(file);
            if !recorded_by_directory.contains_key(&directory) {
                let recorded = if request.mode.is_append() {
                    let identity = ManifestIdentity::new(directory.clone(), request.algorithm);
                    self.store.read_recorded_files(&identity)?
                } else {
                    HashSet::new()
                };
                debug!(
                    directory = %directory.display(),
                    recorded = recorded.len(),
                    "Loaded recorded files"
                );
                recorded_by_directory.insert(directory.clone(), recorded);
            }

            let key = file
                .to_str()
                .ok_or_else(|| ChecksumError::NonUtf8Path { path: file.clone() })?;
            let already_recorded = recorded_by_directory
                .get(&directory)
                .map(|recorded| recorded.contains(key))
                .unwrap_or(false);
            if already_recorded {
                trace!(path = %file.display(), "Already recorded, skipping");
                skipped += 1;
            } else {
                pending.push(file.clone());
            }
        }

        Ok(FilteredCandidates { pending, skipped })
    }
}

/// Digest one file; the handle is closed on every path
fn digest_file(path: &Path, digest: DigestFunction) -> Result<ChecksumRecord, ChecksumError> {
    let digest_error = |source| ChecksumError::Digest {
        path: path.to_path_buf(),
        algorithm: digest.algorithm(),
        source,
    };
    let file = File::open(path).map_err(digest_error)?;
    let bytes = digest.digest(file).map_err(digest_error)?;
    trace!(path = %path.display(), algorithm = %digest.algorithm(), "Digested file");
    Ok(ChecksumRecord::new(path.to_path_buf(), bytes, digest.algorithm()))
}

/// Digest every pending file, preserving input order.
///
/// With more than one thread the work runs on a dedicated rayon pool. The first failure
/// fails the whole batch.
fn digest_files(
    files: &[PathBuf],
    digest: DigestFunction,
    threads: Option<usize>,
) -> Result<Vec<ChecksumRecord>, ChecksumError> {
    match threads {
        Some(threads) if threads > 1 && files.len() > 1 => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    ChecksumError::ConfigError(format!("Failed to build digest thread pool: {}", e))
                })?;
            debug!(threads, files = files.len(), "Digesting in parallel");
            pool.install(|| {
                files
                    .par_iter()
                    .map(|file| digest_file(file, digest))
                    .collect()
            })
        }
        _ => files.iter().map(|file| digest_file(file, digest)).collect(),
    }
}

/// Group records by manifest identity (algorithm, then directory)
fn group_records(records: Vec<ChecksumRecord>) -> BTreeMap<ManifestIdentity, Vec<ChecksumRecord>> {
    let mut groups: BTreeMap<ManifestIdentity, Vec<ChecksumRecord>> = BTreeMap::new();
    for record in records {
        let identity = ManifestIdentity::new(record.directory(), record.algorithm());
        groups.entry(identity).or_default().push(record);
    }
    groups
}
