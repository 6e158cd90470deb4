//! Manifest Store
//!
//! Reads the set of files a manifest already records, and writes batches of new records
//! in truncate or append mode. The store does no deduplication of its own: callers only
//! hand it records for files the manifest does not yet contain.

use crate::codec::{ReaderConfig, RecordReader, RecordWriter};
use crate::error::{ChecksumError, CodecError};
use crate::manifest::{ManifestIdentity, CHECKSUM_COLUMN, DELIMITER, FILE_COLUMN};
use crate::types::{ChecksumRecord, WriteMode};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use tracing::{debug, info};

/// Manifest persistence interface
pub trait ManifestStore: Send + Sync {
    /// File paths already recorded in the manifest; empty when it does not exist
    fn read_recorded_files(
        &self,
        identity: &ManifestIdentity,
    ) -> Result<HashSet<String>, ChecksumError>;

    /// Write `records` to the manifest, returning the number of rows written
    fn write(
        &self,
        identity: &ManifestIdentity,
        records: &[ChecksumRecord],
        mode: WriteMode,
    ) -> Result<usize, ChecksumError>;
}

/// Manifest store over the local filesystem
///
/// The target directory must already exist; it is never created.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsManifestStore;

impl FsManifestStore {
    pub fn new() -> Self {
        Self
    }

    fn reader_config() -> ReaderConfig {
        ReaderConfig {
            delimiter: DELIMITER,
            has_header: true,
        }
    }

    fn record_writer() -> RecordWriter {
        RecordWriter::new(DELIMITER, [FILE_COLUMN, CHECKSUM_COLUMN])
    }

    fn record_field(record: &&ChecksumRecord, column: &str) -> Option<String> {
        match column {
            FILE_COLUMN => record.file_str().map(str::to_string),
            CHECKSUM_COLUMN => Some(record.hex_digest()),
            _ => None,
        }
    }
}

impl ManifestStore for FsManifestStore {
    fn read_recorded_files(
        &self,
        identity: &ManifestIdentity,
    ) -> Result<HashSet<String>, ChecksumError> {
        let path = identity.path();
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(manifest = %path.display(), "No existing manifest");
                return Ok(HashSet::new());
            }
            Err(e) => {
                return Err(ChecksumError::ManifestDecode {
                    path,
                    reason: format!("failed to open: {}", e),
                })
            }
        };

        let mut reader = RecordReader::new(BufReader::new(file), Self::reader_config());
        let mut recorded = HashSet::new();
        let mut header_checked = false;
        let mut record_number = 0usize;

        while let Some(row) = reader.next() {
            let row = row.map_err(|e| ChecksumError::ManifestDecode {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            record_number += 1;

            if !header_checked {
                ensure_file_column(reader.headers(), &path)?;
                header_checked = true;
            }

            let file = row
                .column(FILE_COLUMN)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ChecksumError::ManifestDecode {
                    path: path.clone(),
                    reason: format!("record {} has no {} value", record_number, FILE_COLUMN),
                })?;
            recorded.insert(file.to_string());
        }

        // A header-only manifest still has to declare the file column.
        if !header_checked && reader.headers().is_some() {
            ensure_file_column(reader.headers(), &path)?;
        }

        debug!(
            manifest = %path.display(),
            recorded = recorded.len(),
            "Read recorded files"
        );
        Ok(recorded)
    }

    fn write(
        &self,
        identity: &ManifestIdentity,
        records: &[ChecksumRecord],
        mode: WriteMode,
    ) -> Result<usize, ChecksumError> {
        let path = identity.path();
        if let Some(record) = records.iter().find(|record| record.file_str().is_none()) {
            return Err(ChecksumError::NonUtf8Path {
                path: record.file_path().to_path_buf(),
            });
        }
        let write_error = |e: CodecError| ChecksumError::ManifestWrite {
            path: path.clone(),
            source: e,
        };

        let (file, emit_header) = match mode {
            WriteMode::Truncate => {
                let file = File::create(&path).map_err(|e| write_error(e.into()))?;
                (file, true)
            }
            WriteMode::Append => {
                let mut file = OpenOptions::new()
                    .read(true)
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|e| write_error(e.into()))?;
                let existing_len = file.metadata().map_err(|e| write_error(e.into()))?.len();
                if existing_len > 0 {
                    terminate_last_line(&mut file).map_err(|e| write_error(e.into()))?;
                }
                (file, existing_len == 0)
            }
        };

        let written = Self::record_writer()
            .with_header(emit_header)
            .write(file, records.iter(), Self::record_field)
            .map_err(write_error)?;

        info!(
            manifest = %path.display(),
            algorithm = %identity.algorithm,
            mode = %mode,
            records = written,
            "Wrote manifest"
        );
        Ok(written)
    }
}

/// Append a newline when the existing content does not end with one
fn terminate_last_line(file: &mut File) -> std::io::Result<()> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        file.write_all(b"\n")?;
    }
    Ok(())
}

fn ensure_file_column(
    headers: Option<&[String]>,
    path: &std::path::Path,
) -> Result<(), ChecksumError> {
    let has_file_column = headers
        .map(|headers| headers.iter().any(|header| header == FILE_COLUMN))
        .unwrap_or(false);
    if has_file_column {
        Ok(())
    } else {
        Err(ChecksumError::ManifestDecode {
            path: path.to_path_buf(),
            reason: format!("missing {} column in header", FILE_COLUMN),
        })
    }
}
