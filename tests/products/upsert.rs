//! Upsert behaviour of scripted and partial updates.

use crate::common::*;

const GUARDED_DECREMENT: &str = "if (ctx._source.in_stock > 0) { ctx._source.in_stock--; }";

fn blender() -> Document {
    Document::new()
        .with("name", "Blender")
        .with("price", 399)
        .with("in_stock", 5)
}

#[test]
fn scripted_upsert_creates_missing_document() {
    let db = products_db();
    let written = db
        .update_script(PRODUCTS, "blender_001", GUARDED_DECREMENT, Some(blender()))
        .unwrap();

    assert_eq!(written.result, ResultCode::Created);
    assert_eq!(written.version, 1);

    let read = db.get(PRODUCTS, "blender_001").unwrap();
    assert_eq!(read.source, Some(blender()));
    assert_eq!(read.version, Some(1));
}

#[test]
fn scripted_upsert_runs_script_when_present() {
    let db = products_db();
    db.update_script(PRODUCTS, "blender_001", GUARDED_DECREMENT, Some(blender()))
        .unwrap();
    let written = db
        .update_script(PRODUCTS, "blender_001", GUARDED_DECREMENT, Some(blender()))
        .unwrap();

    assert_eq!(written.result, ResultCode::Updated);
    assert_eq!(written.version, 2);
    assert_eq!(field(&db, "blender_001", "in_stock"), Some(Value::Int(4)));
}

#[test]
fn doc_as_upsert_creates_then_merges() {
    let db = products_db();
    let created = db
        .upsert(PRODUCTS, "kettle_001", Document::new().with("name", "Kettle"))
        .unwrap();
    assert_eq!(created.result, ResultCode::Created);

    let merged = db
        .upsert(PRODUCTS, "kettle_001", Document::new().with("price", 25))
        .unwrap();
    assert_eq!(merged.result, ResultCode::Updated);
    assert_eq!(merged.version, 2);
    assert_eq!(
        db.get(PRODUCTS, "kettle_001").unwrap().source,
        Some(Document::new().with("name", "Kettle").with("price", 25))
    );
}

#[test]
fn upsert_auto_creates_collection() {
    init_tracing();
    let db = DocStore::ephemeral();
    assert!(!db.collection_exists("appliances").unwrap());
    db.update_script("appliances", "toaster", GUARDED_DECREMENT, Some(blender()))
        .unwrap();
    assert!(db.collection_exists("appliances").unwrap());
    assert_eq!(db.count("appliances").unwrap(), 1);
}
