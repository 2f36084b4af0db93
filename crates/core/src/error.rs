//! Error types for docstore
//!
//! This module defines all error types used by the core, storage and
//! primitive layers. We use `thiserror` for automatic `Display` and `Error`
//! trait implementations.

use crate::types::DocKey;
use thiserror::Error;

/// Result type alias for docstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the document store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No record exists at the key and the operation has no upsert fallback
    #[error("document not found: {0}")]
    NotFound(DocKey),

    /// Explicit-id create collided with an existing record
    #[error("document already exists: {0}")]
    Conflict(DocKey),

    /// Optimistic version check failed
    #[error("version conflict on {key}: expected {expected}, current {actual}")]
    VersionConflict {
        /// Document the check ran against
        key: DocKey,
        /// Version the caller expected
        expected: u64,
        /// Version currently stored
        actual: u64,
    },

    /// Collection does not exist
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// Collection already exists
    #[error("collection already exists: {0}")]
    CollectionExists(String),

    /// Malformed identifier, document or request
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Update script failed to compile or evaluate
    #[error("script error: {0}")]
    Script(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Build an `InvalidInput` error from anything displayable
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput(reason.into())
    }

    /// Build a `Script` error from anything displayable
    pub fn script(reason: impl Into<String>) -> Self {
        Error::Script(reason.into())
    }

    /// True for `NotFound` and `CollectionNotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::CollectionNotFound(_))
    }

    /// True for `Conflict` and `VersionConflict`
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_) | Error::VersionConflict { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
