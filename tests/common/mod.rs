//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from any test's
//! main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::Once;

pub use docstore::{
    Command, DocStore, DocStoreConfig, Document, DocumentStore, Error, Executor, Output,
    ResultCode, Value,
};
pub use docstore_core::{CollectionName, DocumentId, Version};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Set `DOCSTORE_TEST_TRACE` to see debug-level store events in test output.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let level = if std::env::var_os("DOCSTORE_TEST_TRACE").is_some() {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Fixtures
// ============================================================================

/// Collection used by the product scenarios.
pub const PRODUCTS: &str = "products";

/// Id of the scenario's coffee maker.
pub const COFFEE_MAKER_ID: &str = "coffee_maker_001";

/// `{name: "Coffee maker", price: 64, in_stock: 10}`
pub fn coffee_maker() -> Document {
    Document::new()
        .with("name", "Coffee maker")
        .with("price", 64)
        .with("in_stock", 10)
}

/// Ephemeral store with an empty `products` collection.
pub fn products_db() -> DocStore {
    init_tracing();
    let db = DocStore::ephemeral();
    db.create_collection(PRODUCTS).unwrap();
    db
}

/// Store holding the coffee maker at version 1.
pub fn seeded_db() -> DocStore {
    let db = products_db();
    db.create(PRODUCTS, Some(COFFEE_MAKER_ID), coffee_maker())
        .unwrap();
    db
}

/// Read one field of a document.
pub fn field(db: &DocStore, id: &str, name: &str) -> Option<Value> {
    db.get(PRODUCTS, id)
        .unwrap()
        .source
        .and_then(|doc| doc.get(name).cloned())
}

/// Current version of a document.
pub fn version(db: &DocStore, id: &str) -> u64 {
    db.get(PRODUCTS, id).unwrap().version.unwrap_or(0)
}

pub fn collection(name: &str) -> CollectionName {
    CollectionName::new(name).unwrap()
}

pub fn doc_id(id: &str) -> DocumentId {
    DocumentId::new(id).unwrap()
}
