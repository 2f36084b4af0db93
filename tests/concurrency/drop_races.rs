//! Dropping a collection while a write to it is in flight.
//!
//! The drop takes the collection out of the registry at once. A write that
//! already holds one of its key locks still commits and reports success, but
//! into the detached collection: once the drop returns, neither the write nor
//! any other document of the old collection is visible, and a later write
//! starts a fresh collection.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::common::*;

#[test]
fn write_in_flight_during_drop_is_discarded() {
    init_tracing();
    let store = DocumentStore::new();
    let products = collection(PRODUCTS);
    store
        .create(&products, coffee_maker(), Some(doc_id(COFFEE_MAKER_ID)))
        .unwrap();

    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let writer_store = store.clone();
    let writer_products = products.clone();
    let writer = thread::spawn(move || {
        writer_store.update_scripted(
            &writer_products,
            &doc_id(COFFEE_MAKER_ID),
            |doc| {
                entered_tx.send(()).unwrap();
                release_rx.recv().unwrap();
                Ok(doc.clone().with("in_stock", 9))
            },
            None,
        )
    });

    // The writer now holds the coffee maker's key lock
    entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();

    let dropper_store = store.clone();
    let dropper_products = products.clone();
    let dropper = thread::spawn(move || dropper_store.drop_collection(&dropper_products));

    while store.collection_exists(&products) {
        thread::yield_now();
    }
    assert!(!store.lookup(&products, &doc_id(COFFEE_MAKER_ID)).found);

    release_tx.send(()).unwrap();
    let written = writer.join().unwrap().unwrap();
    assert_eq!(written.result, ResultCode::Updated);
    assert_eq!(written.version, Version::new(2));
    dropper.join().unwrap().unwrap();

    assert!(!store.collection_exists(&products));
    assert!(store
        .get(&products, &doc_id(COFFEE_MAKER_ID))
        .unwrap_err()
        .is_not_found());

    let recreated = store
        .update_scripted(
            &products,
            &doc_id(COFFEE_MAKER_ID),
            |doc| Ok(doc.clone()),
            Some(coffee_maker()),
        )
        .unwrap();
    assert_eq!(recreated.result, ResultCode::Created);
    assert_eq!(recreated.version, Version::INITIAL);
    assert_eq!(store.count(&products).unwrap(), 1);
}
