use std::collections::HashSet;

use filesum::{
    Algorithm, ChecksumRecord, FsManifestStore, ManifestIdentity, ManifestStore, WriteMode,
};
use proptest::prelude::*;
use tempfile::TempDir;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn truncate_write_reads_back_the_same_paths(
        names in proptest::collection::hash_set("[a-z0-9_]{1,12}", 0..24),
        digest in proptest::collection::vec(any::<u8>(), 16),
    ) {
        let temp = TempDir::new().unwrap();
        let identity = ManifestIdentity::new(temp.path(), Algorithm::Md5);
        let records: Vec<ChecksumRecord> = names
            .iter()
            .map(|name| ChecksumRecord::new(temp.path().join(name), digest.clone(), Algorithm::Md5))
            .collect();

        let store = FsManifestStore::new();
        store.write(&identity, &records, WriteMode::Truncate).unwrap();
        let recorded = store.read_recorded_files(&identity).unwrap();

        let expected: HashSet<String> = records
            .iter()
            .filter_map(|record| record.file_str().map(str::to_string))
            .collect();
        prop_assert_eq!(expected.len(), records.len());
        prop_assert_eq!(recorded, expected);
    }
}

#[test]
fn append_batches_read_back_as_union() {
    let temp = TempDir::new().unwrap();
    let identity = ManifestIdentity::new(temp.path(), Algorithm::Sha256);
    let store = FsManifestStore::new();

    let batch = |names: &[&str]| -> Vec<ChecksumRecord> {
        names
            .iter()
            .map(|name| ChecksumRecord::new(temp.path().join(name), vec![0u8; 32], Algorithm::Sha256))
            .collect()
    };

    store.write(&identity, &batch(&["a", "b"]), WriteMode::Append).unwrap();
    store.write(&identity, &batch(&["c"]), WriteMode::Append).unwrap();

    let recorded = store.read_recorded_files(&identity).unwrap();
    let expected: HashSet<String> = ["a", "b", "c"]
        .iter()
        .map(|name| temp.path().join(name).to_string_lossy().into_owned())
        .collect();
    assert_eq!(recorded, expected);
}
