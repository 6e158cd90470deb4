use std::fs;
use std::sync::Arc;

use filesum::tooling::cli::{CliContext, Commands};
use filesum::{
    Algorithm, ChecksumError, ChecksumOrchestrator, ChecksumRequest, DigestRegistry,
    FsManifestStore, WriteMode,
};
use tempfile::TempDir;

use crate::integration::support::{manifest_path, write_file};

fn cli() -> CliContext {
    CliContext::with_config(Default::default(), ChecksumOrchestrator::new())
}

#[test]
fn unsupported_algorithm_touches_nothing() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.txt", "alpha");

    let err = cli()
        .execute(&Commands::Checksum {
            path: temp.path().to_path_buf(),
            algorithm: Some("crc32".to_string()),
            recursive: false,
            append: false,
            jobs: None,
            format: "text".to_string(),
        })
        .unwrap_err();

    assert!(matches!(err, ChecksumError::UnsupportedAlgorithm(_)));
    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("a.txt")]);
}

#[test]
fn algorithm_missing_from_registry_is_rejected() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.txt", "alpha");

    let orchestrator =
        ChecksumOrchestrator::with_parts(DigestRegistry::empty(), Arc::new(FsManifestStore::new()));
    let err = orchestrator
        .run(&ChecksumRequest::new(temp.path(), Algorithm::Md5))
        .unwrap_err();
    assert!(err.is_config_error());
    assert!(!manifest_path(temp.path(), Algorithm::Md5).exists());
}

#[test]
fn missing_root_is_config_error() {
    let temp = TempDir::new().unwrap();
    let err = ChecksumOrchestrator::new()
        .run(&ChecksumRequest::new(temp.path().join("absent"), Algorithm::Md5))
        .unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn malformed_manifest_aborts_append_run() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.txt", "alpha");
    let manifest = manifest_path(temp.path(), Algorithm::Sha256);
    fs::write(&manifest, "name|digest\nx|y\n").unwrap();

    let err = ChecksumOrchestrator::new()
        .run(
            &ChecksumRequest::new(temp.path(), Algorithm::Sha256).mode(WriteMode::Append),
        )
        .unwrap_err();

    assert!(matches!(err, ChecksumError::ManifestDecode { .. }));
    assert_eq!(fs::read_to_string(&manifest).unwrap(), "name|digest\nx|y\n");
}

#[test]
fn malformed_manifest_is_ignored_by_truncate() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.txt", "alpha");
    let manifest = manifest_path(temp.path(), Algorithm::Sha256);
    fs::write(&manifest, "garbage without header\n").unwrap();

    let report = ChecksumOrchestrator::new()
        .run(&ChecksumRequest::new(temp.path(), Algorithm::Sha256))
        .unwrap();

    assert_eq!(report.digested, 1);
    assert!(fs::read_to_string(&manifest)
        .unwrap()
        .starts_with("file|checksum\n"));
}

#[cfg(unix)]
#[test]
fn unreadable_candidate_fails_the_run_before_any_write() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.txt", "alpha");
    std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("b.txt")).unwrap();

    let err = ChecksumOrchestrator::new()
        .run(&ChecksumRequest::new(temp.path(), Algorithm::Md5))
        .unwrap_err();

    match err {
        ChecksumError::Digest {
            path, algorithm, ..
        } => {
            assert_eq!(path, temp.path().join("b.txt"));
            assert_eq!(algorithm, Algorithm::Md5);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!manifest_path(temp.path(), Algorithm::Md5).exists());
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_names_are_never_recorded() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "ok.txt", "ok");
    fs::write(temp.path().join(OsStr::from_bytes(b"a\xff")), "first").unwrap();
    fs::write(temp.path().join(OsStr::from_bytes(b"a\xfe")), "second").unwrap();

    let err = ChecksumOrchestrator::new()
        .run(&ChecksumRequest::new(temp.path(), Algorithm::Md5).mode(WriteMode::Append))
        .unwrap_err();

    assert!(matches!(err, ChecksumError::NonUtf8Path { .. }));
    assert!(!err.is_config_error());
    assert!(!manifest_path(temp.path(), Algorithm::Md5).exists());
}
