use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use findex::pool::hash_files;
use findex::{
    build_index, diff_indexes, reevaluate, reevaluate_file, scan_dir, Digest, FolderIndex,
    IndexerConfig, NoProgress,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

fn key(root: &Path, name: &str) -> String {
    root.join(name).to_string_lossy().into_owned()
}

#[test]
fn test_empty_folder_builds_empty_index() {
    let dir = tempdir().unwrap();
    let index = build_index(dir.path(), &IndexerConfig::default()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&index.to_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "folder": dir.path().to_string_lossy(), "index": {} })
    );
}

#[test]
fn test_single_file_has_known_digest() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();

    let index = build_index(dir.path(), &IndexerConfig::default()).unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(
        index.get(&key(dir.path(), "a.txt")).unwrap().to_string(),
        HELLO_SHA256
    );
}

#[test]
fn test_modified_file_is_reported_as_changed() {
    let dir = tempdir().unwrap();
    let config = IndexerConfig::default();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    let previous = build_index(dir.path(), &config).unwrap();

    fs::write(dir.path().join("a.txt"), "hello, world").unwrap();
    let diff = reevaluate(&previous, &config).unwrap();

    let a = key(dir.path(), "a.txt");
    assert_eq!(
        diff.changed,
        BTreeMap::from([(
            a,
            (
                HELLO_SHA256.parse::<Digest>().unwrap(),
                Digest::of_bytes(b"hello, world")
            )
        )])
    );
    assert!(diff.added.is_empty());
    assert!(diff.removed.is_empty());
}

#[test]
fn test_deleted_and_new_files_are_reported() {
    let dir = tempdir().unwrap();
    let config = IndexerConfig::default();
    let saved = dir.path().join("index.json");
    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("a.txt"), "hello").unwrap();
    build_index(&data, &config).unwrap().save(&saved).unwrap();

    fs::remove_file(data.join("a.txt")).unwrap();
    fs::write(data.join("b.txt"), "bee").unwrap();
    let comparison = reevaluate_file(&saved, &config, &NoProgress).unwrap();

    assert_eq!(comparison.diff.removed, BTreeSet::from([key(&data, "a.txt")]));
    assert_eq!(comparison.diff.added, BTreeSet::from([key(&data, "b.txt")]));
    assert!(comparison.diff.changed.is_empty());
}

#[test]
fn test_thread_count_does_not_affect_result() {
    let dir = tempdir().unwrap();
    for i in 0..40 {
        let sub = dir.path().join(format!("nested/{}", i % 5));
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join(format!("{i}.dat")), format!("payload {i}").repeat(i)).unwrap();
    }

    let one = build_index(dir.path(), &IndexerConfig::default().with_threads(1)).unwrap();
    let many = build_index(
        dir.path(),
        &IndexerConfig::default().with_threads(7).with_chunk_size(3),
    )
    .unwrap();

    assert_eq!(one, many);
    assert!(diff_indexes(&one, &many).is_empty());
}

#[test]
fn test_diff_of_index_with_itself_is_empty() {
    let index = FolderIndex::new(
        "x",
        BTreeMap::from([
            ("x/a".to_string(), Digest::of_bytes(b"a")),
            ("x/b".to_string(), Digest::Unreadable),
        ]),
    );
    assert!(diff_indexes(&index, &index).is_empty());
}

#[test]
fn test_unreadable_file_gets_sentinel() {
    let dir = tempdir().unwrap();
    let config = IndexerConfig::default().with_threads(2);
    fs::write(dir.path().join("a.txt"), "secret").unwrap();
    fs::write(dir.path().join("b.txt"), "open").unwrap();

    // a.txt disappears between enumeration and hashing, so open fails for
    // every user, root included
    let files: Vec<_> = scan_dir(dir.path()).unwrap().collect();
    fs::remove_file(dir.path().join("a.txt")).unwrap();
    let entries = hash_files(files, &config, &NoProgress).unwrap();
    let index = FolderIndex::new(dir.path().to_string_lossy(), entries);

    assert_eq!(index.len(), 2);
    assert_eq!(index.get(&key(dir.path(), "a.txt")), Some(&Digest::Unreadable));
    assert_eq!(
        index.get(&key(dir.path(), "b.txt")),
        Some(&Digest::of_bytes(b"open"))
    );
    assert_eq!(
        serde_json::to_value(&index).unwrap()["index"][key(dir.path(), "a.txt")],
        "BAD_STREAM_SKIPPED"
    );
    assert!(diff_indexes(&index, &index).is_empty());

    fs::write(dir.path().join("a.txt"), "secret").unwrap();
    let diff = reevaluate(&index, &config).unwrap();
    assert_eq!(
        diff.changed,
        BTreeMap::from([(
            key(dir.path(), "a.txt"),
            (Digest::Unreadable, Digest::of_bytes(b"secret"))
        )])
    );
    assert!(diff.added.is_empty());
    assert!(diff.removed.is_empty());
}
