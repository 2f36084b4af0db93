//! Racing creates and upserts on one id produce exactly one record.

use std::sync::{Arc, Barrier};
use std::thread;

use crate::common::*;

const THREADS: usize = 8;

#[test]
fn exactly_one_create_wins() {
    let db = products_db();
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS as i64)
        .map(|t| {
            let db = db.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                db.create(PRODUCTS, Some("contested"), Document::new().with("writer", t))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(Error::Conflict { .. })))
        .count();

    assert_eq!(winners, 1);
    assert_eq!(conflicts, THREADS - 1);
    assert_eq!(version(&db, "contested"), 1);
}

#[test]
fn racing_upserts_create_once() {
    let db = products_db();
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let db = db.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                db.update_script(
                    PRODUCTS,
                    "stock",
                    "ctx._source.count++",
                    Some(Document::new().with("count", 1)),
                )
                .unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let created = results
        .iter()
        .filter(|w| w.result == ResultCode::Created)
        .count();

    assert_eq!(created, 1);
    assert_eq!(field(&db, "stock", "count"), Some(Value::Int(THREADS as i64)));
    assert_eq!(version(&db, "stock"), THREADS as u64);
}

#[test]
fn concurrent_generated_ids_never_collide() {
    let db = products_db();
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let db = db.clone();
            thread::spawn(move || {
                (0..100)
                    .map(|_| db.create(PRODUCTS, None, coffee_maker()).unwrap().id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), THREADS * 100);
    assert_eq!(db.count(PRODUCTS).unwrap(), (THREADS * 100) as u64);
}
