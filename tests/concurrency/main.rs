//! Concurrency Integration Tests
//!
//! Per-key serialization of read-modify-write updates: no lost updates,
//! exact version counting, and independence of different keys.

#[path = "../common/mod.rs"]
mod common;

mod create_races;
mod drop_races;
mod key_isolation;
mod version_counter;
