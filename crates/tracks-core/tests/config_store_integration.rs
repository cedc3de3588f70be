//! Integration tests for the configuration store.
//!
//! These tests drive `ConfigStore` through its public API against real files
//! in a temporary directory, covering the behaviours callers rely on:
//!
//! - defaults-only initialization when no file exists,
//! - partial merges of nested keys,
//! - arrays that are never merged,
//! - user keys that survive reconciliation,
//! - the lossy array-to-string normalization on reload.

use std::path::Path;

use tracks_core::{decode, ConfigDocument, ConfigError, ConfigStore, ConfigValue};

fn write(path: &Path, content: &str) {
    std::fs::write(path, content).expect("write fixture");
}

fn on_disk(path: &Path) -> ConfigDocument {
    decode(&std::fs::read_to_string(path).expect("read config")).expect("decode config")
}

fn x_equals_one() -> ConfigValue {
    ConfigValue::object([("x", ConfigValue::from(1u64))])
}

#[test]
fn test_empty_defaults_and_missing_file_produce_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut store = ConfigStore::new(&path);

    let doc = store.initialize().expect("initialize");

    assert!(doc.is_empty());
    assert!(on_disk(&path).is_empty());
}

#[test]
fn test_default_is_inserted_and_persisted_when_file_is_missing() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut store = ConfigStore::new(&path);
    store.register_default("a", x_equals_one()).unwrap();

    // Act
    store.initialize().expect("initialize");

    // Assert
    assert_eq!(store.get("a"), Some(&x_equals_one()));
    let expected: ConfigDocument = [("a", x_equals_one())].into_iter().collect();
    assert_eq!(on_disk(&path), expected);
}

#[test]
fn test_partial_object_is_completed_from_defaults() {
    // Arrange: the file has `a.y`, the default contributes `a.x`.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    write(&path, r#"{"a": {"y": 2}}"#);
    let mut store = ConfigStore::new(&path);
    store.register_default("a", x_equals_one()).unwrap();

    // Act
    store.initialize().expect("initialize");

    // Assert
    let expected = ConfigValue::object([
        ("x", ConfigValue::from(1u64)),
        ("y", ConfigValue::from(2u64)),
    ]);
    assert_eq!(store.get("a"), Some(&expected));
    assert_eq!(on_disk(&path).get("a"), Some(&expected));
}

#[test]
fn test_existing_array_is_not_merged_with_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    write(&path, r#"{"b": ["p"]}"#);
    let mut store = ConfigStore::new(&path);
    store
        .register_default("b", ConfigValue::array(["q", "r"]))
        .unwrap();

    store.initialize().expect("initialize");

    assert_eq!(store.get("b"), Some(&ConfigValue::array(["p"])));
}

#[test]
fn test_keys_without_defaults_are_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    write(&path, r#"{"c": 5}"#);
    let mut store = ConfigStore::new(&path);
    store.register_default("a", x_equals_one()).unwrap();

    store.initialize().expect("initialize");

    assert_eq!(store.get("c"), Some(&ConfigValue::from(5u64)));
    assert_eq!(store.get("a"), Some(&x_equals_one()));
}

#[test]
fn test_round_trip_without_defaults_normalizes_arrays_to_strings() {
    // Arrange: first store writes the raw document.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    write(
        &path,
        r#"{"name": "tracks", "enabled": false, "http": {"port": 4567}, "ids": [1, 2, 3]}"#,
    );
    let mut first = ConfigStore::new(&path);
    first.initialize().expect("initialize");
    let persisted = std::fs::read_to_string(&path).expect("read config");

    // Act: a second store re-loads what the first one persisted.
    let mut second = ConfigStore::new(&path);
    second.initialize().expect("initialize");

    // Assert: the file itself now holds the array as strings.
    assert!(
        persisted.contains("\"ids\": [\n    \"1\",\n    \"2\",\n    \"3\"\n  ]"),
        "numeric array must be written as strings, got:\n{persisted}"
    );
    assert!(!persisted.contains("    1,"));

    // And reloading it is stable.
    assert_eq!(second.document(), first.document());
    assert_eq!(second.get("ids"), Some(&ConfigValue::array(["1", "2", "3"])));
    assert_eq!(second.get("name"), Some(&ConfigValue::from("tracks")));
    assert_eq!(second.get("enabled"), Some(&ConfigValue::from(false)));
    assert_eq!(second.get_u64_in("http", "port"), Some(4567));
}

#[test]
fn test_persisted_values_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut first = ConfigStore::new(&path);
    first.register_default("a", x_equals_one()).unwrap();
    first.initialize().unwrap();
    first.put("a", ConfigValue::object([("x", ConfigValue::from(99u64))]));
    first.persist();

    let mut second = ConfigStore::new(&path);
    second.register_default("a", x_equals_one()).unwrap();
    second.initialize().unwrap();

    assert_eq!(second.get_u64_in("a", "x"), Some(99));
}

#[test]
fn test_scalar_default_is_rejected_and_registry_unchanged() {
    let mut store = ConfigStore::new("never-written.json");
    store.register_default("a", x_equals_one()).unwrap();

    let result = store.register_default("n", 7u64);

    assert!(matches!(result, Err(ConfigError::InvalidDefaultKind { .. })));
    assert_eq!(store.defaults().len(), 1);
    assert!(store.defaults().get("n").is_none());
}

#[test]
fn test_file_written_with_two_space_indentation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut store = ConfigStore::new(&path);
    store.register_default("a", x_equals_one()).unwrap();

    store.initialize().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "{\n  \"a\": {\n    \"x\": 1\n  }\n}");
}
