//! Errors surface as structured, serializable values with status codes.

use serde_json::json;

use crate::common::*;

fn execute(executor: &Executor, command: serde_json::Value) -> Result<Output, Error> {
    let cmd: Command = serde_json::from_value(command).unwrap();
    executor.execute(cmd)
}

fn seeded_executor() -> Executor {
    init_tracing();
    let executor = Executor::new(DocumentStore::new());
    execute(
        &executor,
        json!({"Index": {
            "collection": "products",
            "id": "coffee_maker_001",
            "document": {"name": "Coffee maker", "price": 64, "in_stock": 10}
        }}),
    )
    .unwrap();
    executor
}

#[test]
fn duplicate_create_is_409() {
    let executor = seeded_executor();
    let err = execute(
        &executor,
        json!({"Index": {"collection": "products", "id": "coffee_maker_001", "document": {}}}),
    )
    .unwrap_err();
    assert_eq!(err.status_code(), 409);
}

#[test]
fn op_type_index_replaces_instead() {
    let executor = seeded_executor();
    let output = execute(
        &executor,
        json!({"Index": {
            "collection": "products",
            "id": "coffee_maker_001",
            "document": {"name": "Replaced"},
            "op_type": "index"
        }}),
    )
    .unwrap();
    match output {
        Output::Write(w) => {
            assert_eq!(w.result, ResultCode::Updated);
            assert_eq!(w.version, 2);
        }
        other => panic!("Expected Write, got {:?}", other),
    }
}

#[test]
fn missing_document_is_404() {
    let executor = seeded_executor();
    let err = execute(
        &executor,
        json!({"Get": {"collection": "products", "id": "nope"}}),
    )
    .unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        json!({"DocumentNotFound": {"key": "products/nope"}})
    );
}

#[test]
fn stale_version_is_409_with_versions() {
    let executor = seeded_executor();
    let err = execute(
        &executor,
        json!({"Update": {
            "collection": "products",
            "id": "coffee_maker_001",
            "body": {"doc": {"price": 1}, "if_version": 7}
        }}),
    )
    .unwrap_err();
    assert_eq!(
        err,
        Error::VersionConflict {
            key: "products/coffee_maker_001".into(),
            expected: 7,
            actual: 1,
        }
    );
}

#[test]
fn bad_script_is_400() {
    let executor = seeded_executor();
    for source in [
        "ctx._source.in_stock--- ;",
        "ctx._source.in_stock = missing_var",
        "ctx._source.price = ctx._source.price / 0",
        "if (ctx._source.name) { ctx._source.in_stock = 0; }",
    ] {
        let err = execute(
            &executor,
            json!({"Update": {
                "collection": "products",
                "id": "coffee_maker_001",
                "body": {"script": source}
            }}),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Script { .. }), "{}: {:?}", source, err);
        assert_eq!(err.status_code(), 400);
    }

    // Nothing above committed
    let output = execute(
        &executor,
        json!({"Get": {"collection": "products", "id": "coffee_maker_001"}}),
    )
    .unwrap();
    match output {
        Output::Get(g) => assert_eq!(g.version, Some(1)),
        other => panic!("Expected Get, got {:?}", other),
    }
}

#[test]
fn unsupported_lang_is_invalid_input() {
    let executor = seeded_executor();
    let err = execute(
        &executor,
        json!({"Update": {
            "collection": "products",
            "id": "coffee_maker_001",
            "body": {"script": {"source": "ctx._source.in_stock--", "lang": "expression"}}
        }}),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[test]
fn invalid_collection_names_are_rejected() {
    let executor = seeded_executor();
    for name in ["Products", "_hidden", "a/b", "..", ""] {
        let err = execute(
            &executor,
            json!({"Index": {"collection": name, "document": {}}}),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }), "{:?}", name);
    }
}

#[test]
fn doc_and_script_together_are_rejected() {
    let executor = seeded_executor();
    let err = execute(
        &executor,
        json!({"Update": {
            "collection": "products",
            "id": "coffee_maker_001",
            "body": {"doc": {"price": 1}, "script": "ctx._source.price = 2"}
        }}),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}
