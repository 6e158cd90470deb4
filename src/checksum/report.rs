//! Run report types.

use crate::digest::Algorithm;
use crate::types::WriteMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One manifest written during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSummary {
    pub path: PathBuf,
    pub records: usize,
}

/// Outcome of a checksum run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksumReport {
    pub root: PathBuf,
    pub algorithm: Algorithm,
    pub mode: WriteMode,
    pub recursive: bool,
    /// Candidate files found by enumeration
    pub candidates: usize,
    /// Candidates already recorded in their manifest
    pub skipped: usize,
    /// Candidates digested in this run
    pub digested: usize,
    pub manifests: Vec<ManifestSummary>,
    pub duration_ms: u64,
}

impl ChecksumReport {
    pub fn records_written(&self) -> usize {
        self.manifests.iter().map(|m| m.records).sum()
    }
}
