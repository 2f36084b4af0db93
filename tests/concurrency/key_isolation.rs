//! Writers on different keys do not wait on each other's transforms.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::common::*;

#[test]
fn slow_transform_does_not_block_other_keys() {
    init_tracing();
    let store = DocumentStore::new();
    let products = collection(PRODUCTS);
    store
        .create(&products, Document::new().with("n", 0), Some(doc_id("slow")))
        .unwrap();
    store
        .create(&products, Document::new().with("n", 0), Some(doc_id("fast")))
        .unwrap();

    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let slow_store = store.clone();
    let slow_products = products.clone();
    let slow = thread::spawn(move || {
        slow_store
            .update_scripted(
                &slow_products,
                &doc_id("slow"),
                |doc| {
                    entered_tx.send(()).unwrap();
                    release_rx.recv().unwrap();
                    Ok(doc.clone().with("n", 1))
                },
                None,
            )
            .unwrap()
    });

    // The slow transform now holds the "slow" key lock
    entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();

    let written = store
        .update(&products, &doc_id("fast"), Document::new().with("n", 1))
        .unwrap();
    assert_eq!(written.version, Version::new(2));
    assert!(store.lookup(&products, &doc_id("fast")).found);

    release_tx.send(()).unwrap();
    let slow_written = slow.join().unwrap();
    assert_eq!(slow_written.version, Version::new(2));
}

#[test]
fn many_keys_in_parallel() {
    let db = products_db();
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let db = db.clone();
            thread::spawn(move || {
                let id = format!("item_{}", t);
                db.create(PRODUCTS, Some(&id), Document::new().with("n", 0))
                    .unwrap();
                for _ in 0..100 {
                    db.update_script(PRODUCTS, &id, "ctx._source.n += 1", None)
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(db.count(PRODUCTS).unwrap(), 8);
    for t in 0..8 {
        let id = format!("item_{}", t);
        assert_eq!(field(&db, &id, "n"), Some(Value::Int(100)));
        assert_eq!(version(&db, &id), 101);
    }
}
