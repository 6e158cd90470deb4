//! Filesum: Incremental Checksum Manifests
//!
//! Computes content digests for files and records them in hidden per-directory manifests
//! (`.<algorithm>.checksum`), one per (directory, algorithm) pair. Append runs skip files a
//! manifest already records; truncate runs rewrite each manifest from scratch.

pub mod checksum;
pub mod codec;
pub mod config;
pub mod digest;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod tooling;
pub mod tree;
pub mod types;

pub use checksum::{ChecksumOrchestrator, ChecksumReport, ChecksumRequest};
pub use digest::{Algorithm, DigestRegistry};
pub use error::ChecksumError;
pub use manifest::{FsManifestStore, ManifestIdentity, ManifestStore};
pub use types::{ChecksumRecord, WriteMode};
