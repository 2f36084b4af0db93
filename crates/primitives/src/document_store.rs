//! DocumentStore: versioned document storage primitive
//!
//! ## Design
//!
//! DocumentStore is a stateless facade over `ShardedStore`. It holds an
//! `Arc<ShardedStore>` and its options, nothing else. Cloning is cheap and
//! every clone sees the same data.
//!
//! ## Versioning
//!
//! A record starts at version 1 and every successful mutation adds exactly
//! one. Failed operations (conflicts, transform errors, invalid documents)
//! leave both the document and the version as they were.
//!
//! ## Thread Safety
//!
//! Every mutation locks the key's slot for its whole read-modify-write. Two
//! writers on one key are totally ordered; writers on different keys never
//! wait on each other's transforms.
//!
//! ## API
//!
//! - **Writes**: `create`, `index`, `update`, `update_if_version`,
//!   `update_scripted`
//! - **Reads**: `get`, `lookup`, `exists`
//! - **Collections**: `create_collection`, `collection_exists`,
//!   `drop_collection`, `count`, `collection_info`, `list_collections`

use std::sync::Arc;

use docstore_core::{
    CollectionName, DocKey, Document, DocumentId, Error, Result, Timestamp, Version, Versioned,
};
use docstore_storage::{Collection, CollectionSettings, Record, ShardedStore, Slot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Behaviour switches for a `DocumentStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Create unknown collections on first document write
    pub auto_create_collections: bool,
    /// Deepest accepted document nesting
    pub max_nesting_depth: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            auto_create_collections: true,
            max_nesting_depth: docstore_core::limits::DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Outcome reported by a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultCode {
    /// A new record was created
    Created,
    /// An existing record was modified
    Updated,
}

impl ResultCode {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultCode::Created => "created",
            ResultCode::Updated => "updated",
        }
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful write
#[derive(Debug, Clone, PartialEq)]
pub struct WriteResult {
    /// Key written
    pub key: DocKey,
    /// Version after the write
    pub version: Version,
    /// Whether the write created or modified the record
    pub result: ResultCode,
}

impl WriteResult {
    /// True when the write created the record
    pub fn created(&self) -> bool {
        self.result == ResultCode::Created
    }
}

/// Result of a read
#[derive(Debug, Clone, PartialEq)]
pub struct GetResult {
    /// Key read
    pub key: DocKey,
    /// Whether a record exists
    pub found: bool,
    /// Document, when found
    pub document: Option<Document>,
    /// Version, when found
    pub version: Option<Version>,
    /// Time the current version was written, when found
    pub updated_at: Option<Timestamp>,
}

impl GetResult {
    fn found(record: &Record) -> Self {
        let Versioned {
            value,
            version,
            timestamp,
        } = record.versioned();
        GetResult {
            key: record.key().clone(),
            found: true,
            document: Some(value),
            version: Some(version),
            updated_at: Some(timestamp),
        }
    }

    fn missing(key: DocKey) -> Self {
        GetResult {
            key,
            found: false,
            document: None,
            version: None,
            updated_at: None,
        }
    }

    /// Document, version and write time as a contract type, when found
    pub fn versioned(&self) -> Option<Versioned<Document>> {
        match (&self.document, self.version, self.updated_at) {
            (Some(document), Some(version), Some(timestamp)) => Some(Versioned::with_timestamp(
                document.clone(),
                version,
                timestamp,
            )),
            _ => None,
        }
    }
}

/// Summary of one collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionInfo {
    /// Collection name
    pub name: CollectionName,
    /// Settings given at creation, defaults if auto-created
    pub settings: CollectionSettings,
    /// Creation time
    pub created_at: Timestamp,
    /// Number of records
    pub count: u64,
}

/// Versioned document store
///
/// # Example
///
/// ```ignore
/// use docstore_primitives::DocumentStore;
///
/// let store = DocumentStore::new();
/// let products = CollectionName::new("products")?;
/// let id = DocumentId::new("coffee_maker_001")?;
///
/// store.create(&products, Document::new().with("in_stock", 10), Some(id.clone()))?;
/// store.update(&products, &id, Document::new().with("in_stock", 5))?;
/// ```
#[derive(Debug, Clone)]
pub struct DocumentStore {
    storage: Arc<ShardedStore>,
    options: StoreOptions,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Create an empty store with default options
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    /// Create an empty store
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            storage: Arc::new(ShardedStore::new()),
            options,
        }
    }

    /// Underlying storage
    pub fn storage(&self) -> &Arc<ShardedStore> {
        &self.storage
    }

    /// Options in effect
    pub fn options(&self) -> StoreOptions {
        self.options
    }

    // ========== Collections ==========

    /// Create a collection
    pub fn create_collection(
        &self,
        name: &CollectionName,
        settings: CollectionSettings,
    ) -> Result<()> {
        if settings.number_of_shards == 0 {
            return Err(Error::invalid_input("number_of_shards must be at least 1"));
        }
        self.storage.create_collection(name, settings)?;
        info!(
            target: "docstore::collections",
            collection = %name,
            shards = settings.number_of_shards,
            replicas = settings.number_of_replicas,
            "Collection created"
        );
        Ok(())
    }

    /// Check whether a collection exists
    pub fn collection_exists(&self, name: &CollectionName) -> bool {
        self.storage.has_collection(name)
    }

    /// Drop a collection and all of its records
    ///
    /// Returns once writes already holding one of its key locks have
    /// finished; their results are discarded with the collection.
    pub fn drop_collection(&self, name: &CollectionName) -> Result<()> {
        let dropped = self
            .storage
            .drop_collection(name)
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))?;
        info!(
            target: "docstore::collections",
            collection = %name,
            records = dropped.len(),
            "Collection dropped"
        );
        Ok(())
    }

    /// Number of records in a collection
    pub fn count(&self, name: &CollectionName) -> Result<u64> {
        self.storage
            .collection(name)
            .map(|collection| collection.len() as u64)
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))
    }

    /// Settings, creation time and record count of a collection
    pub fn collection_info(&self, name: &CollectionName) -> Result<CollectionInfo> {
        let collection = self
            .storage
            .collection(name)
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))?;
        Ok(CollectionInfo {
            name: name.clone(),
            settings: collection.settings(),
            created_at: collection.created_at(),
            count: collection.len() as u64,
        })
    }

    /// Names of all collections, sorted
    pub fn list_collections(&self) -> Vec<CollectionName> {
        self.storage.collection_names()
    }

    fn collection_for_write(&self, name: &CollectionName) -> Result<Arc<Collection>> {
        if !self.options.auto_create_collections {
            return self
                .storage
                .collection(name)
                .ok_or_else(|| Error::CollectionNotFound(name.to_string()));
        }
        let (collection, created) = self.storage.get_or_create(name);
        if created {
            info!(target: "docstore::collections", collection = %name, "Collection auto-created");
        }
        Ok(collection)
    }

    fn validate(&self, document: &Document) -> Result<()> {
        document
            .validate_depth(self.options.max_nesting_depth)
            .map_err(|e| Error::InvalidInput(e.to_string()))
    }

    /// Slot of an existing record, or `NotFound`
    fn existing(&self, collection: &CollectionName, id: &DocumentId) -> Result<Slot> {
        self.storage
            .collection(collection)
            .and_then(|c| c.existing_slot(id))
            .ok_or_else(|| Error::NotFound(DocKey::new(collection.clone(), id.clone())))
    }

    // ========== Writes ==========

    /// Create a new record at version 1
    ///
    /// Without an `id` a fresh one is generated. With an `id` that already
    /// holds a record the call fails with `Conflict` and the record is left
    /// untouched.
    pub fn create(
        &self,
        collection: &CollectionName,
        document: Document,
        id: Option<DocumentId>,
    ) -> Result<WriteResult> {
        self.validate(&document)?;
        let target = self.collection_for_write(collection)?;

        let (id, slot) = match id {
            Some(id) => {
                let slot = target.slot(&id);
                (id, slot)
            }
            None => target.reserve_generated(),
        };
        let key = DocKey::new(collection.clone(), id);

        let mut guard = slot.lock();
        if guard.is_some() {
            warn!(target: "docstore::documents", key = %key, "Create rejected, document exists");
            return Err(Error::Conflict(key));
        }
        *guard = Some(Record::new(key.clone(), document));

        debug!(target: "docstore::documents", key = %key, version = %Version::INITIAL, "Document created");
        Ok(WriteResult {
            key,
            version: Version::INITIAL,
            result: ResultCode::Created,
        })
    }

    /// Create a record or fully replace an existing one
    ///
    /// Replacing does not merge: fields missing from `document` are gone
    /// afterwards. The version advances by one and the result is `updated`.
    pub fn index(
        &self,
        collection: &CollectionName,
        document: Document,
        id: Option<DocumentId>,
    ) -> Result<WriteResult> {
        let Some(id) = id else {
            return self.create(collection, document, None);
        };
        self.validate(&document)?;
        let target = self.collection_for_write(collection)?;
        let key = DocKey::new(collection.clone(), id);

        let slot = target.slot(&key.id);
        let mut guard = slot.lock();
        let (version, result) = match guard.as_mut() {
            Some(record) => (record.commit(document), ResultCode::Updated),
            None => {
                *guard = Some(Record::new(key.clone(), document));
                (Version::INITIAL, ResultCode::Created)
            }
        };

        debug!(target: "docstore::documents", key = %key, version = %version, result = %result, "Document indexed");
        Ok(WriteResult {
            key,
            version,
            result,
        })
    }

    /// Merge `changes` into an existing record
    ///
    /// Fields absent from `changes` keep their values. Fails with
    /// `NotFound` if there is no record.
    pub fn update(
        &self,
        collection: &CollectionName,
        id: &DocumentId,
        changes: Document,
    ) -> Result<WriteResult> {
        self.mutate_existing(collection, id, None, |current| Ok(current.merged(changes)))
    }

    /// Merge `changes` if the record is still at `expected`
    ///
    /// Fails with `VersionConflict` when another write got there first.
    pub fn update_if_version(
        &self,
        collection: &CollectionName,
        id: &DocumentId,
        changes: Document,
        expected: Version,
    ) -> Result<WriteResult> {
        self.mutate_existing(collection, id, Some(expected), |current| {
            Ok(current.merged(changes))
        })
    }

    /// Apply `transform` to the record under its key lock
    ///
    /// - Record exists: the transform's output replaces the document and the
    ///   version advances; result `updated`.
    /// - Record missing with `upsert`: `upsert` is stored as-is at version 1
    ///   without running the transform; result `created`.
    /// - Record missing without `upsert`: `NotFound`.
    ///
    /// The transform runs at most once per call. If it fails, nothing is
    /// written.
    pub fn update_scripted<F>(
        &self,
        collection: &CollectionName,
        id: &DocumentId,
        transform: F,
        upsert: Option<Document>,
    ) -> Result<WriteResult>
    where
        F: FnOnce(&Document) -> Result<Document>,
    {
        let Some(upsert) = upsert else {
            return self.mutate_existing(collection, id, None, transform);
        };

        let target = self.collection_for_write(collection)?;
        let key = DocKey::new(collection.clone(), id.clone());

        let slot = target.slot(id);
        let mut guard = slot.lock();
        match guard.as_mut() {
            Some(record) => {
                let next = transform(record.document())?;
                self.validate(&next)?;
                let version = record.commit(next);
                debug!(target: "docstore::documents", key = %key, version = %version, "Document updated");
                Ok(WriteResult {
                    key,
                    version,
                    result: ResultCode::Updated,
                })
            }
            None => {
                self.validate(&upsert)?;
                *guard = Some(Record::new(key.clone(), upsert));
                debug!(target: "docstore::documents", key = %key, "Document upserted");
                Ok(WriteResult {
                    key,
                    version: Version::INITIAL,
                    result: ResultCode::Created,
                })
            }
        }
    }

    fn mutate_existing<F>(
        &self,
        collection: &CollectionName,
        id: &DocumentId,
        expected: Option<Version>,
        transform: F,
    ) -> Result<WriteResult>
    where
        F: FnOnce(&Document) -> Result<Document>,
    {
        let key = DocKey::new(collection.clone(), id.clone());
        let slot = self.existing(collection, id)?;
        let mut guard = slot.lock();
        let Some(record) = guard.as_mut() else {
            return Err(Error::NotFound(key));
        };

        if let Some(expected) = expected {
            if record.version() != expected {
                warn!(
                    target: "docstore::documents",
                    key = %key,
                    expected = %expected,
                    actual = %record.version(),
                    "Update rejected, version mismatch"
                );
                return Err(Error::VersionConflict {
                    key,
                    expected: expected.as_u64(),
                    actual: record.version().as_u64(),
                });
            }
        }

        let next = transform(record.document())?;
        self.validate(&next)?;
        let version = record.commit(next);

        debug!(target: "docstore::documents", key = %key, version = %version, "Document updated");
        Ok(WriteResult {
            key,
            version,
            result: ResultCode::Updated,
        })
    }

    // ========== Reads ==========

    /// Read a record; fails with `NotFound` if it does not exist
    pub fn get(&self, collection: &CollectionName, id: &DocumentId) -> Result<GetResult> {
        let result = self.lookup(collection, id);
        if result.found {
            Ok(result)
        } else {
            Err(Error::NotFound(result.key))
        }
    }

    /// Read a record, reporting `found = false` if it does not exist
    pub fn lookup(&self, collection: &CollectionName, id: &DocumentId) -> GetResult {
        let record = self
            .storage
            .collection(collection)
            .and_then(|c| c.read(id));
        match record {
            Some(record) => GetResult::found(&record),
            None => GetResult::missing(DocKey::new(collection.clone(), id.clone())),
        }
    }

    /// Check whether a record exists
    pub fn exists(&self, collection: &CollectionName, id: &DocumentId) -> bool {
        self.storage
            .collection(collection)
            .and_then(|c| c.existing_slot(id))
            .is_some_and(|slot| slot.lock().is_some())
    }
}
