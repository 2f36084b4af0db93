//! Product Catalog Integration Tests
//!
//! End-to-end scenarios on a `products` collection: create, read, partial
//! update, scripted update and upsert.

#[path = "../common/mod.rs"]
mod common;

mod scripted;
mod upsert;
