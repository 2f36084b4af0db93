//! High-level typed wrapper for the Executor.
//!
//! The [`DocStore`] struct provides a convenient Rust API that wraps the
//! [`Executor`] and [`Command`]/[`Output`] enums with typed method calls.
//!
//! # Example
//!
//! ```ignore
//! use docstore_executor::DocStore;
//! use docstore_core::Document;
//!
//! let db = DocStore::ephemeral();
//!
//! db.create("products", Some("coffee_maker_001"), document)?;
//! db.update_script("products", "coffee_maker_001", "ctx._source.in_stock--", None)?;
//! let doc = db.get("products", "coffee_maker_001")?;
//! ```

use std::path::Path;

use docstore_core::Document;
use docstore_primitives::DocumentStore;
use tracing::info;

use crate::config::{DocStoreConfig, CONFIG_FILE_NAME};
use crate::types::*;
use crate::{Command, Error, Executor, Output, Result};

/// High-level typed wrapper for store operations.
///
/// Each method:
///
/// 1. Creates the appropriate [`Command`]
/// 2. Executes it via the [`Executor`]
/// 3. Extracts and returns the typed result
#[derive(Debug, Clone)]
pub struct DocStore {
    executor: Executor,
    config: DocStoreConfig,
}

impl DocStore {
    /// Create an empty store with default configuration.
    pub fn ephemeral() -> Self {
        Self::with_config(DocStoreConfig::default())
    }

    /// Create an empty store with the given configuration.
    pub fn with_config(config: DocStoreConfig) -> Self {
        let store = DocumentStore::with_options(config.store_options());
        Self {
            executor: Executor::new(store),
            config,
        }
    }

    /// Create an empty store configured from `dir/docstore.toml`.
    ///
    /// The directory is created if needed and a default config file is
    /// written on first open. Data is kept in memory only.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| Error::Internal {
            reason: format!("Failed to create directory '{}': {}", dir.display(), e),
        })?;
        let path = dir.join(CONFIG_FILE_NAME);
        DocStoreConfig::write_default_if_missing(&path)?;
        let config = DocStoreConfig::from_file(&path)?;
        info!(
            target: "docstore::executor",
            path = %path.display(),
            auto_create_collections = config.auto_create_collections,
            max_nesting_depth = config.max_nesting_depth,
            "Opened store"
        );
        Ok(Self::with_config(config))
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Configuration in effect.
    pub fn config(&self) -> &DocStoreConfig {
        &self.config
    }

    fn write(&self, cmd: Command) -> Result<WriteResponse> {
        let name = cmd.name();
        match self.executor.execute(cmd)? {
            Output::Write(response) => Ok(response),
            _ => Err(unexpected(name)),
        }
    }

    fn acknowledged(&self, cmd: Command) -> Result<()> {
        let name = cmd.name();
        match self.executor.execute(cmd)? {
            Output::Acknowledged => Ok(()),
            _ => Err(unexpected(name)),
        }
    }

    fn boolean(&self, cmd: Command) -> Result<bool> {
        let name = cmd.name();
        match self.executor.execute(cmd)? {
            Output::Bool(b) => Ok(b),
            _ => Err(unexpected(name)),
        }
    }

    // =========================================================================
    // Collection Operations (6)
    // =========================================================================

    /// Create a collection with default settings.
    pub fn create_collection(&self, collection: &str) -> Result<()> {
        self.acknowledged(Command::CreateCollection {
            collection: collection.to_string(),
            settings: None,
        })
    }

    /// Create a collection with explicit settings.
    pub fn create_collection_with(
        &self,
        collection: &str,
        settings: CollectionSettings,
    ) -> Result<()> {
        self.acknowledged(Command::CreateCollection {
            collection: collection.to_string(),
            settings: Some(settings),
        })
    }

    /// Check whether a collection exists.
    pub fn collection_exists(&self, collection: &str) -> Result<bool> {
        self.boolean(Command::CollectionExists {
            collection: collection.to_string(),
        })
    }

    /// Drop a collection and its documents.
    pub fn drop_collection(&self, collection: &str) -> Result<()> {
        self.acknowledged(Command::DropCollection {
            collection: collection.to_string(),
        })
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> Result<u64> {
        match self.executor.execute(Command::Count {
            collection: collection.to_string(),
        })? {
            Output::Count(n) => Ok(n),
            _ => Err(unexpected("Count")),
        }
    }

    /// Settings, creation time and document count of a collection.
    pub fn collection_info(&self, collection: &str) -> Result<CollectionInfoResponse> {
        match self.executor.execute(Command::CollectionInfo {
            collection: collection.to_string(),
        })? {
            Output::CollectionInfo(info) => Ok(info),
            _ => Err(unexpected("CollectionInfo")),
        }
    }

    /// Names of all collections, sorted.
    pub fn list_collections(&self) -> Result<Vec<String>> {
        match self.executor.execute(Command::ListCollections)? {
            Output::Collections(names) => Ok(names),
            _ => Err(unexpected("ListCollections")),
        }
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Create a document; fails with `Conflict` if `id` is taken.
    pub fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        document: Document,
    ) -> Result<WriteResponse> {
        self.write(Command::Index {
            collection: collection.to_string(),
            id: id.map(str::to_string),
            document,
            op_type: OpType::Create,
        })
    }

    /// Create or fully replace a document.
    pub fn index(
        &self,
        collection: &str,
        id: Option<&str>,
        document: Document,
    ) -> Result<WriteResponse> {
        self.write(Command::Index {
            collection: collection.to_string(),
            id: id.map(str::to_string),
            document,
            op_type: OpType::Index,
        })
    }

    /// Read a document; fails with `DocumentNotFound` if it is missing.
    pub fn get(&self, collection: &str, id: &str) -> Result<GetResponse> {
        match self.executor.execute(Command::Get {
            collection: collection.to_string(),
            id: id.to_string(),
        })? {
            Output::Get(response) => Ok(response),
            _ => Err(unexpected("Get")),
        }
    }

    /// Check whether a document exists.
    pub fn exists(&self, collection: &str, id: &str) -> Result<bool> {
        self.boolean(Command::Exists {
            collection: collection.to_string(),
            id: id.to_string(),
        })
    }

    /// Run an update with a full request body.
    pub fn update_with(&self, collection: &str, id: &str, body: UpdateBody) -> Result<WriteResponse> {
        self.write(Command::Update {
            collection: collection.to_string(),
            id: id.to_string(),
            body,
        })
    }

    /// Merge `doc` into an existing document.
    pub fn update(&self, collection: &str, id: &str, doc: Document) -> Result<WriteResponse> {
        self.update_with(collection, id, UpdateBody::doc(doc))
    }

    /// Merge `doc` if the document is still at `expected`.
    pub fn update_if_version(
        &self,
        collection: &str,
        id: &str,
        doc: Document,
        expected: u64,
    ) -> Result<WriteResponse> {
        self.update_with(
            collection,
            id,
            UpdateBody {
                if_version: Some(expected),
                ..UpdateBody::doc(doc)
            },
        )
    }

    /// Run a script against a document, storing `upsert` if it is missing.
    pub fn update_script(
        &self,
        collection: &str,
        id: &str,
        script: impl Into<ScriptSpec>,
        upsert: Option<Document>,
    ) -> Result<WriteResponse> {
        let body = UpdateBody {
            upsert,
            ..UpdateBody::script(script)
        };
        self.update_with(collection, id, body)
    }

    /// Merge `doc` into a document, creating it from `doc` if missing.
    pub fn upsert(&self, collection: &str, id: &str, doc: Document) -> Result<WriteResponse> {
        self.update_with(
            collection,
            id,
            UpdateBody {
                doc_as_upsert: true,
                ..UpdateBody::doc(doc)
            },
        )
    }
}

fn unexpected(command: &str) -> Error {
    Error::Internal {
        reason: format!("Unexpected output for {}", command),
    }
}
