//! Command enum defining all docstore operations.
//!
//! Commands are the "instruction set" of docstore. Every operation that can
//! be performed on the store is represented as a variant of this enum.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON for cross-language use
//! - **Pure data**: Scripts travel as source text, never as closures

use serde::{Deserialize, Serialize};

use docstore_core::Document;

use crate::types::*;

/// A command is a self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Document | 4 | Index, get, exists, update |
/// | Collection | 6 | Create, exists, drop, count, info, list |
///
/// Collection names and document ids are carried as plain strings and
/// validated by the executor, so a bad name surfaces as
/// [`Error::InvalidInput`](crate::Error::InvalidInput) rather than a
/// deserialization failure.
///
/// # Example
///
/// ```ignore
/// use docstore_executor::{Command, OpType};
///
/// let cmd = Command::Index {
///     collection: "products".into(),
///     id: Some("coffee_maker_001".into()),
///     document,
///     op_type: OpType::Create,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Document (4) ====================
    /// Store a document, generating an id if none is given.
    /// Returns: `Output::Write`
    Index {
        collection: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        document: Document,
        #[serde(default)]
        op_type: OpType,
    },

    /// Read a document.
    /// Returns: `Output::Get`
    Get { collection: String, id: String },

    /// Check whether a document exists.
    /// Returns: `Output::Bool`
    Exists { collection: String, id: String },

    /// Partial, scripted or upserting update.
    /// Returns: `Output::Write`
    Update {
        collection: String,
        id: String,
        body: UpdateBody,
    },

    // ==================== Collection (6) ====================
    /// Create a collection.
    /// Returns: `Output::Acknowledged`
    CreateCollection {
        collection: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        settings: Option<CollectionSettings>,
    },

    /// Check whether a collection exists.
    /// Returns: `Output::Bool`
    CollectionExists { collection: String },

    /// Drop a collection with all of its documents.
    /// Returns: `Output::Acknowledged`
    DropCollection { collection: String },

    /// Count documents in a collection.
    /// Returns: `Output::Count`
    Count { collection: String },

    /// Settings, creation time and document count of a collection.
    /// Returns: `Output::CollectionInfo`
    CollectionInfo { collection: String },

    /// Names of all collections, sorted.
    /// Returns: `Output::Collections`
    ListCollections,
}

impl Command {
    /// Variant name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Index { .. } => "Index",
            Command::Get { .. } => "Get",
            Command::Exists { .. } => "Exists",
            Command::Update { .. } => "Update",
            Command::CreateCollection { .. } => "CreateCollection",
            Command::CollectionExists { .. } => "CollectionExists",
            Command::DropCollection { .. } => "DropCollection",
            Command::Count { .. } => "Count",
            Command::CollectionInfo { .. } => "CollectionInfo",
            Command::ListCollections => "ListCollections",
        }
    }

    /// True for commands that never modify state
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Command::Get { .. }
                | Command::Exists { .. }
                | Command::CollectionExists { .. }
                | Command::Count { .. }
                | Command::CollectionInfo { .. }
                | Command::ListCollections
        )
    }
}
