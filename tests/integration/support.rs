use filesum::{Algorithm, ChecksumOrchestrator, ChecksumReport, ChecksumRequest, WriteMode};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn run(root: &Path, algorithm: Algorithm, recursive: bool, mode: WriteMode) -> ChecksumReport {
    let request = ChecksumRequest::new(root, algorithm)
        .recursive(recursive)
        .mode(mode);
    ChecksumOrchestrator::new().run(&request).unwrap()
}

pub fn manifest_path(dir: &Path, algorithm: Algorithm) -> PathBuf {
    dir.join(format!(".{}.checksum", algorithm.name()))
}

/// Data lines of a manifest (header excluded), sorted
pub fn manifest_entries(dir: &Path, algorithm: Algorithm) -> Vec<String> {
    let content = fs::read_to_string(manifest_path(dir, algorithm)).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("file|checksum"));
    let mut entries: Vec<String> = lines.map(str::to_string).collect();
    entries.sort();
    entries
}

pub fn entry(path: &Path, hex: &str) -> String {
    format!("{}|{}", path.display(), hex)
}

pub fn hex_digest(algorithm: Algorithm, content: &str) -> String {
    let function = filesum::DigestRegistry::with_defaults()
        .resolve(algorithm)
        .unwrap();
    hex::encode(function.digest(Cursor::new(content.as_bytes().to_vec())).unwrap())
}
