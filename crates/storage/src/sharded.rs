//! Sharded storage
//!
//! DashMap of collections, each a DashMap of per-key slots.
//!
//! # Design
//!
//! - DashMap: 16-way sharded by default, reads take a shard read lock only
//! - FxHash inside collections: fast non-crypto hash for document ids
//! - Per-key mutex: one writer per `(collection, id)`, no lock shared across
//!   keys while a mutation runs
//!
//! # Thread Safety
//!
//! All operations are thread-safe:
//! - Different collections never contend
//! - Different ids in one collection contend only on the brief slot lookup
//! - Operations on one id are totally ordered by its slot mutex

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use docstore_core::{CollectionName, Error, Result};
use std::sync::Arc;

use crate::collection::{Collection, CollectionSettings};

/// Registry of all collections
///
/// # Example
///
/// ```ignore
/// use docstore_storage::ShardedStore;
/// use std::sync::Arc;
///
/// let store = Arc::new(ShardedStore::new());
/// let products = store.get_or_create(&name).0;
/// ```
#[derive(Debug, Default)]
pub struct ShardedStore {
    collections: DashMap<CollectionName, Arc<Collection>>,
}

impl ShardedStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection
    ///
    /// Fails with `CollectionExists` if the name is taken.
    pub fn create_collection(
        &self,
        name: &CollectionName,
        settings: CollectionSettings,
    ) -> Result<Arc<Collection>> {
        match self.collections.entry(name.clone()) {
            Entry::Occupied(_) => Err(Error::CollectionExists(name.to_string())),
            Entry::Vacant(vacant) => {
                let collection = Arc::new(Collection::new(name.clone(), settings));
                vacant.insert(Arc::clone(&collection));
                Ok(collection)
            }
        }
    }

    /// Look up a collection
    pub fn collection(&self, name: &CollectionName) -> Option<Arc<Collection>> {
        self.collections
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Look up a collection, creating it with default settings if absent
    ///
    /// Returns the collection and whether this call created it.
    pub fn get_or_create(&self, name: &CollectionName) -> (Arc<Collection>, bool) {
        match self.collections.entry(name.clone()) {
            Entry::Occupied(occupied) => (Arc::clone(occupied.get()), false),
            Entry::Vacant(vacant) => {
                let collection = Arc::new(Collection::new(
                    name.clone(),
                    CollectionSettings::default(),
                ));
                vacant.insert(Arc::clone(&collection));
                (collection, true)
            }
        }
    }

    /// Check whether a collection exists
    pub fn has_collection(&self, name: &CollectionName) -> bool {
        self.collections.contains_key(name)
    }

    /// Remove a collection and every record in it
    ///
    /// The name is unlinked at once, so later lookups miss. Writes already
    /// holding a slot of the returned collection commit into it and are
    /// discarded with it.
    pub fn drop_collection(&self, name: &CollectionName) -> Option<Arc<Collection>> {
        self.collections.remove(name).map(|(_, collection)| collection)
    }

    /// Names of all collections, sorted
    pub fn collection_names(&self) -> Vec<CollectionName> {
        let mut names: Vec<CollectionName> = self
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }
}
