//! Scripted updates against the coffee maker.

use crate::common::*;

const GUARDED_DECREMENT: &str = "if (ctx._source.in_stock > 0) { ctx._source.in_stock--; }";

#[test]
fn full_scenario() {
    let db = seeded_db();
    assert_eq!(version(&db, COFFEE_MAKER_ID), 1);

    db.update(
        PRODUCTS,
        COFFEE_MAKER_ID,
        Document::new()
            .with("price", 59)
            .with("in_stock", 5)
            .with("on_sale", true),
    )
    .unwrap();
    assert_eq!(version(&db, COFFEE_MAKER_ID), 2);

    let written = db
        .update_script(PRODUCTS, COFFEE_MAKER_ID, GUARDED_DECREMENT, None)
        .unwrap();
    assert_eq!(written.result, ResultCode::Updated);
    assert_eq!(written.version, 3);
    assert_eq!(field(&db, COFFEE_MAKER_ID, "in_stock"), Some(Value::Int(4)));
    assert_eq!(field(&db, COFFEE_MAKER_ID, "name"), Some(Value::from("Coffee maker")));
}

#[test]
fn decrement_stops_at_zero() {
    let db = seeded_db();
    for n in 1..=12u64 {
        db.update_script(PRODUCTS, COFFEE_MAKER_ID, GUARDED_DECREMENT, None)
            .unwrap();
        let expected = 10i64.saturating_sub(n as i64).max(0);
        assert_eq!(
            field(&db, COFFEE_MAKER_ID, "in_stock"),
            Some(Value::Int(expected))
        );
        assert_eq!(version(&db, COFFEE_MAKER_ID), 1 + n);
    }
}

#[test]
fn script_can_add_fields() {
    let db = seeded_db();
    db.update_script(
        PRODUCTS,
        COFFEE_MAKER_ID,
        "ctx._source.tags = 'kitchen'; ctx._source['on sale'] = ctx._source.price < 70;",
        None,
    )
    .unwrap();
    assert_eq!(field(&db, COFFEE_MAKER_ID, "tags"), Some(Value::from("kitchen")));
    assert_eq!(field(&db, COFFEE_MAKER_ID, "on sale"), Some(Value::Bool(true)));
}

#[test]
fn scripted_update_on_missing_document_without_upsert() {
    let db = products_db();
    let err = db
        .update_script(PRODUCTS, "ghost", GUARDED_DECREMENT, None)
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(!db.exists(PRODUCTS, "ghost").unwrap());
}

#[test]
fn failing_script_leaves_document_unchanged() {
    let db = seeded_db();
    let err = db
        .update_script(
            PRODUCTS,
            COFFEE_MAKER_ID,
            "ctx._source.in_stock--; ctx._source.price = ctx._source.name * 2;",
            None,
        )
        .unwrap_err();
    assert!(matches!(err, Error::Script { .. }));
    assert_eq!(version(&db, COFFEE_MAKER_ID), 1);
    assert_eq!(field(&db, COFFEE_MAKER_ID, "in_stock"), Some(Value::Int(10)));
}
