//! Concurrent updates on one key are totally ordered.

use std::sync::{Arc, Barrier};
use std::thread;

use crate::common::*;

const THREADS: usize = 8;
const UPDATES_PER_THREAD: usize = 250;

#[test]
fn scripted_increments_are_never_lost() {
    let db = products_db();
    db.create(PRODUCTS, Some("counter"), Document::new().with("hits", 0))
        .unwrap();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let db = db.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..UPDATES_PER_THREAD {
                    db.update_script(PRODUCTS, "counter", "ctx._source.hits++", None)
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let total = (THREADS * UPDATES_PER_THREAD) as i64;
    assert_eq!(field(&db, "counter", "hits"), Some(Value::Int(total)));
    assert_eq!(version(&db, "counter"), 1 + total as u64);
}

#[test]
fn closure_transforms_are_never_lost() {
    init_tracing();
    let store = DocumentStore::new();
    let products = collection(PRODUCTS);
    let id = doc_id("counter");
    store
        .create(&products, Document::new().with("hits", 0), Some(id.clone()))
        .unwrap();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = store.clone();
            let products = products.clone();
            let id = id.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut versions = Vec::with_capacity(UPDATES_PER_THREAD);
                for _ in 0..UPDATES_PER_THREAD {
                    let written = store
                        .update_scripted(
                            &products,
                            &id,
                            |doc| {
                                let hits = doc.get("hits").and_then(Value::as_int).unwrap_or(0);
                                Ok(doc.clone().with("hits", hits + 1))
                            },
                            None,
                        )
                        .unwrap();
                    versions.push(written.version.as_u64());
                }
                versions
            })
        })
        .collect();

    let mut versions: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    versions.sort_unstable();

    // Every commit got its own version, 2..=1+N*M with no gaps
    let total = (THREADS * UPDATES_PER_THREAD) as u64;
    assert_eq!(versions, (2..=1 + total).collect::<Vec<_>>());

    let read = store.get(&products, &id).unwrap();
    assert_eq!(read.version, Some(Version::new(1 + total)));
    assert_eq!(
        read.document.and_then(|d| d.get("hits").cloned()),
        Some(Value::Int(total as i64))
    );
}

#[test]
fn guarded_decrement_never_goes_negative() {
    let db = seeded_db();
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let db = db.clone();
            thread::spawn(move || {
                for _ in 0..5 {
                    db.update_script(
                        PRODUCTS,
                        COFFEE_MAKER_ID,
                        "if (ctx._source.in_stock > 0) { ctx._source.in_stock--; }",
                        None,
                    )
                    .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(field(&db, COFFEE_MAKER_ID, "in_stock"), Some(Value::Int(0)));
    assert_eq!(version(&db, COFFEE_MAKER_ID), 1 + (THREADS * 5) as u64);
}

#[test]
fn optimistic_updates_retry_to_completion() {
    let db = products_db();
    db.create(PRODUCTS, Some("counter"), Document::new().with("hits", 0))
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let db = db.clone();
            thread::spawn(move || {
                let mut conflicts = 0u64;
                for _ in 0..50 {
                    loop {
                        let read = db.get(PRODUCTS, "counter").unwrap();
                        let hits = read
                            .source
                            .as_ref()
                            .and_then(|d| d.get("hits"))
                            .and_then(Value::as_int)
                            .unwrap();
                        let expected = read.version.unwrap();
                        match db.update_if_version(
                            PRODUCTS,
                            "counter",
                            Document::new().with("hits", hits + 1),
                            expected,
                        ) {
                            Ok(_) => break,
                            Err(Error::VersionConflict { .. }) => conflicts += 1,
                            Err(e) => panic!("unexpected error: {}", e),
                        }
                    }
                }
                conflicts
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(field(&db, "counter", "hits"), Some(Value::Int(200)));
    assert_eq!(version(&db, "counter"), 201);
}
