//! The Executor - single entry point to the document store.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! appropriate store operations and converts results to outputs.

use docstore_primitives::DocumentStore;
use tracing::{debug, warn};

use crate::handlers::{collection, document};
use crate::{Command, Output, Result};

/// The command executor - single entry point to the document store.
///
/// The Executor is **stateless**: it holds a `DocumentStore` handle but
/// maintains no state of its own. All state lives in storage.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use docstore_executor::{Command, Executor};
///
/// let executor = Executor::new(DocumentStore::new());
///
/// let result = executor.execute(Command::Get {
///     collection: "products".into(),
///     id: "coffee_maker_001".into(),
/// })?;
///
/// let results = executor.execute_many(vec![
///     Command::Exists { collection: "products".into(), id: "a".into() },
///     Command::Exists { collection: "products".into(), id: "b".into() },
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    store: DocumentStore,
}

impl Executor {
    /// Create a new executor wrapping a document store.
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// The store commands run against.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        debug!(
            target: "docstore::executor",
            command = name,
            read_only = cmd.is_read_only(),
            "Executing command"
        );

        let result = self.dispatch(cmd);
        if let Err(e) = &result {
            if e.status_code() >= 500 {
                warn!(target: "docstore::executor", command = name, error = %e, "Command failed");
            } else {
                debug!(target: "docstore::executor", command = name, error = %e, "Command rejected");
            }
        }
        result
    }

    /// Execute commands in order, collecting every result.
    ///
    /// A failing command does not stop the ones after it.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    fn dispatch(&self, cmd: Command) -> Result<Output> {
        let store = &self.store;
        match cmd {
            // Document commands
            Command::Index {
                collection,
                id,
                document: doc,
                op_type,
            } => document::index(store, collection, id, doc, op_type),
            Command::Get { collection, id } => document::get(store, collection, id),
            Command::Exists { collection, id } => document::exists(store, collection, id),
            Command::Update {
                collection,
                id,
                body,
            } => document::update(store, collection, id, body),

            // Collection commands
            Command::CreateCollection {
                collection: name,
                settings,
            } => collection::create_collection(store, name, settings),
            Command::CollectionExists { collection: name } => {
                collection::collection_exists(store, name)
            }
            Command::DropCollection { collection: name } => {
                collection::drop_collection(store, name)
            }
            Command::Count { collection: name } => collection::count(store, name),
            Command::CollectionInfo { collection: name } => {
                collection::collection_info(store, name)
            }
            Command::ListCollections => collection::list_collections(store),
        }
    }
}
