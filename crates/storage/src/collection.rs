//! Collection shard
//!
//! A `Collection` owns every record of one collection. Each document id maps
//! to a slot: an `Arc<Mutex<Option<Record>>>`. The slot mutex is the unit of
//! serialization for one key.
//!
//! # Locking
//!
//! - The DashMap shard lock is held only to find or insert a slot.
//! - The slot mutex is held for the whole read-modify-write of one key.
//! - No code path holds two slot mutexes at once.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use docstore_core::{CollectionName, DocumentId, Timestamp};
use parking_lot::Mutex;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::BuildHasherDefault;
use std::sync::Arc;

use crate::record::Record;

/// Per-key slot; `None` means no record exists at the key
pub type Slot = Arc<Mutex<Option<Record>>>;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Collection-level settings
///
/// Shard and replica counts are recorded as metadata only; the store keeps
/// every collection in one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionSettings {
    /// Number of primary shards (at least 1)
    #[serde(default = "default_shards")]
    pub number_of_shards: u32,
    /// Number of replicas per shard
    #[serde(default = "default_replicas")]
    pub number_of_replicas: u32,
}

fn default_shards() -> u32 {
    1
}

fn default_replicas() -> u32 {
    1
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            number_of_shards: default_shards(),
            number_of_replicas: default_replicas(),
        }
    }
}

/// All records of one collection
#[derive(Debug)]
pub struct Collection {
    name: CollectionName,
    settings: CollectionSettings,
    created_at: Timestamp,
    slots: DashMap<DocumentId, Slot, FxBuildHasher>,
}

impl Collection {
    /// Create an empty collection
    pub fn new(name: CollectionName, settings: CollectionSettings) -> Self {
        Self {
            name,
            settings,
            created_at: Timestamp::now(),
            slots: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    /// Collection name
    pub fn name(&self) -> &CollectionName {
        &self.name
    }

    /// Settings supplied at creation
    pub fn settings(&self) -> CollectionSettings {
        self.settings
    }

    /// Creation time
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Slot for `id`, inserting an empty one if absent
    pub fn slot(&self, id: &DocumentId) -> Slot {
        Arc::clone(self.slots.entry(id.clone()).or_default().value())
    }

    /// Slot for `id` if one was ever allocated
    ///
    /// Reads use this so probing a missing id allocates nothing.
    pub fn existing_slot(&self, id: &DocumentId) -> Option<Slot> {
        self.slots.get(id).map(|slot| Arc::clone(slot.value()))
    }

    /// Allocate a slot under a freshly generated id
    ///
    /// Regenerates until the id has never been used in this collection.
    pub fn reserve_generated(&self) -> (DocumentId, Slot) {
        loop {
            let id = DocumentId::generate();
            if let Entry::Vacant(vacant) = self.slots.entry(id.clone()) {
                let slot: Slot = Arc::default();
                vacant.insert(Arc::clone(&slot));
                return (id, slot);
            }
            tracing::debug!(target: "docstore::storage", collection = %self.name, id = %id, "Generated id collided, retrying");
        }
    }

    /// Clone of the current record at `id`
    pub fn read(&self, id: &DocumentId) -> Option<Record> {
        self.existing_slot(id).and_then(|slot| slot.lock().clone())
    }

    /// Number of records
    ///
    /// Briefly locks each slot; the count is exact for the moment each slot
    /// was visited.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|entry| entry.value().lock().is_some())
            .count()
    }

    /// True when the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
