//! Storage layer for docstore
//!
//! This crate implements the in-memory storage backend:
//! - ShardedStore: DashMap registry of collections
//! - Collection: DashMap of per-key slots guarded by a mutex each
//! - Record: stored document with version counter and timestamps
//!
//! # Concurrency
//!
//! - Slot lookup takes a DashMap shard lock only for the lookup itself
//! - A mutation holds exactly one slot mutex for its read-modify-write
//! - Keys in different slots never wait on each other's mutations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod record;
pub mod sharded;

pub use collection::{Collection, CollectionSettings, Slot};
pub use record::Record;
pub use sharded::ShardedStore;
