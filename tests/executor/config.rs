//! Opening a store from a directory with `docstore.toml`.

use tempfile::TempDir;

use crate::common::*;

#[test]
fn open_writes_default_config() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let db = DocStore::open(dir.path()).unwrap();

    let path = dir.path().join(docstore::CONFIG_FILE_NAME);
    assert!(path.exists());
    assert_eq!(db.config(), &DocStoreConfig::default());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        DocStoreConfig::default_toml()
    );
}

#[test]
fn open_respects_existing_config() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let config = DocStoreConfig {
        auto_create_collections: false,
        max_nesting_depth: 3,
    };
    config
        .write_to_file(&dir.path().join(docstore::CONFIG_FILE_NAME))
        .unwrap();

    let db = DocStore::open(dir.path()).unwrap();
    assert_eq!(db.config(), &config);

    let err = db.create(PRODUCTS, None, coffee_maker()).unwrap_err();
    assert!(matches!(err, Error::CollectionNotFound { .. }));

    db.create_collection(PRODUCTS).unwrap();
    db.create(PRODUCTS, None, coffee_maker()).unwrap();

    let deep = Document::from_json(serde_json::json!({"a": {"b": {"c": {"d": 1}}}})).unwrap();
    let err = db.create(PRODUCTS, None, deep).unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[test]
fn open_rejects_broken_config() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(docstore::CONFIG_FILE_NAME),
        "max_nesting_depth = \"deep\"\n",
    )
    .unwrap();
    let err = DocStore::open(dir.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[test]
fn open_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("data").join("store");
    DocStore::open(&nested).unwrap();
    assert!(nested.join(docstore::CONFIG_FILE_NAME).exists());
}
