use std::fs;

use filesum::{Algorithm, WriteMode};
use tempfile::TempDir;

use crate::integration::support::{
    entry, hex_digest, manifest_entries, manifest_path, run, write_file,
};

#[test]
fn md5_truncate_over_two_files() {
    let temp = TempDir::new().unwrap();
    let f1 = write_file(temp.path(), "f1.txt", "abc");
    let f2 = write_file(temp.path(), "f2.txt", "xyz");

    let report = run(temp.path(), Algorithm::Md5, false, WriteMode::Truncate);
    assert_eq!(report.digested, 2);
    assert_eq!(report.manifests.len(), 1);
    assert_eq!(report.manifests[0].path, manifest_path(temp.path(), Algorithm::Md5));

    let mut expected = vec![
        entry(&f1, "900150983cd24fb0d6963f7d28e17f72"),
        entry(&f2, "d16fb36f0911f878998c136191af705e"),
    ];
    expected.sort();
    assert_eq!(manifest_entries(temp.path(), Algorithm::Md5), expected);
}

#[test]
fn truncate_is_byte_identical_on_stable_input() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.txt", "alpha");
    write_file(temp.path(), "b.txt", "beta");
    let manifest = manifest_path(temp.path(), Algorithm::Sha256);

    run(temp.path(), Algorithm::Sha256, false, WriteMode::Truncate);
    let first = fs::read(&manifest).unwrap();
    run(temp.path(), Algorithm::Sha256, false, WriteMode::Truncate);
    let second = fs::read(&manifest).unwrap();

    assert_eq!(first, second);
}

#[test]
fn truncate_discards_prior_entries() {
    let temp = TempDir::new().unwrap();
    let a = write_file(temp.path(), "a.txt", "alpha");
    let b = write_file(temp.path(), "b.txt", "beta");

    run(temp.path(), Algorithm::Md5, false, WriteMode::Truncate);
    fs::remove_file(&b).unwrap();
    run(temp.path(), Algorithm::Md5, false, WriteMode::Truncate);

    assert_eq!(
        manifest_entries(temp.path(), Algorithm::Md5),
        vec![entry(&a, &hex_digest(Algorithm::Md5, "alpha"))]
    );
}

#[test]
fn append_is_idempotent() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.txt", "alpha");
    write_file(temp.path(), "b.txt", "beta");
    let manifest = manifest_path(temp.path(), Algorithm::Sha256);

    let first = run(temp.path(), Algorithm::Sha256, false, WriteMode::Append);
    assert_eq!(first.digested, 2);
    let before = fs::read(&manifest).unwrap();
    let modified_before = fs::metadata(&manifest).unwrap().modified().unwrap();

    let second = run(temp.path(), Algorithm::Sha256, false, WriteMode::Append);
    assert_eq!(second.digested, 0);
    assert_eq!(second.skipped, 2);
    assert!(second.manifests.is_empty());
    assert_eq!(fs::read(&manifest).unwrap(), before);
    assert_eq!(
        fs::metadata(&manifest).unwrap().modified().unwrap(),
        modified_before
    );
}

#[test]
fn append_accumulates_without_redigesting() {
    let temp = TempDir::new().unwrap();
    let a = write_file(temp.path(), "a", "first");

    // Run over {a} only.
    run(&a, Algorithm::Md5, false, WriteMode::Append);
    assert_eq!(
        manifest_entries(temp.path(), Algorithm::Md5),
        vec![entry(&a, &hex_digest(Algorithm::Md5, "first"))]
    );

    // Change a, add b, then run over {a, b}.
    write_file(temp.path(), "a", "changed");
    let b = write_file(temp.path(), "b", "second");
    let report = run(temp.path(), Algorithm::Md5, false, WriteMode::Append);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.digested, 1);

    assert_eq!(
        manifest_entries(temp.path(), Algorithm::Md5),
        vec![
            entry(&a, &hex_digest(Algorithm::Md5, "first")),
            entry(&b, &hex_digest(Algorithm::Md5, "second")),
        ]
    );
    let content = fs::read_to_string(manifest_path(temp.path(), Algorithm::Md5)).unwrap();
    assert_eq!(content.matches("file|checksum").count(), 1);
}

#[test]
fn manifests_are_never_candidates() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.txt", "alpha");
    fs::create_dir(temp.path().join("nested")).unwrap();
    write_file(&temp.path().join("nested"), "b.txt", "beta");

    // Manifests from another algorithm already sit in the tree.
    run(temp.path(), Algorithm::Md5, true, WriteMode::Truncate);
    let report = run(temp.path(), Algorithm::Sha256, true, WriteMode::Truncate);
    assert_eq!(report.candidates, 2);

    for algorithm in [Algorithm::Md5, Algorithm::Sha256] {
        for dir in [temp.path().to_path_buf(), temp.path().join("nested")] {
            let entries = manifest_entries(&dir, algorithm);
            assert_eq!(entries.len(), 1);
            assert!(entries.iter().all(|line| !line.contains(".checksum|")));
        }
    }
}

#[test]
fn files_group_into_per_directory_manifests() {
    let temp = TempDir::new().unwrap();
    let left = temp.path().join("left");
    let right = temp.path().join("right");
    fs::create_dir(&left).unwrap();
    fs::create_dir(&right).unwrap();
    let l1 = write_file(&left, "l1", "one");
    let l2 = write_file(&left, "l2", "two");
    let r1 = write_file(&right, "r1", "three");

    let report = run(temp.path(), Algorithm::Blake3, true, WriteMode::Truncate);
    assert_eq!(report.manifests.len(), 2);
    assert!(!manifest_path(temp.path(), Algorithm::Blake3).exists());

    let left_entries = manifest_entries(&left, Algorithm::Blake3);
    assert_eq!(left_entries.len(), 2);
    assert!(left_entries[0].starts_with(&format!("{}|", l1.display())));
    assert!(left_entries[1].starts_with(&format!("{}|", l2.display())));

    assert_eq!(
        manifest_entries(&right, Algorithm::Blake3),
        vec![entry(&r1, &hex_digest(Algorithm::Blake3, "three"))]
    );
}

#[test]
fn non_recursive_ignores_subdirectories() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "top.txt", "top");
    let nested = temp.path().join("nested");
    fs::create_dir(&nested).unwrap();
    write_file(&nested, "deep.txt", "deep");

    let report = run(temp.path(), Algorithm::Sha512, false, WriteMode::Truncate);
    assert_eq!(report.candidates, 1);
    assert!(!manifest_path(&nested, Algorithm::Sha512).exists());
}

#[test]
fn empty_directory_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let report = run(temp.path(), Algorithm::Md5, true, WriteMode::Truncate);
    assert_eq!(report.candidates, 0);
    assert!(report.manifests.is_empty());
    assert!(!manifest_path(temp.path(), Algorithm::Md5).exists());
}
