//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Lossless**: No error information is lost in conversion from internal errors

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Status |
/// |----------|----------|--------|
/// | Not Found | `DocumentNotFound`, `CollectionNotFound` | 404 |
/// | Concurrency | `Conflict`, `VersionConflict` | 409 |
/// | Validation | `InvalidInput`, `Script`, `Serialization`, `CollectionExists` | 400 |
/// | System | `Internal` | 500 |
///
/// # Example
///
/// ```ignore
/// use docstore_executor::{Command, Error, Executor};
///
/// match executor.execute(cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::DocumentNotFound { key }) => {
///         println!("Document '{}' not found", key);
///     }
///     Err(e) => {
///         println!("Error: {}", e);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Not Found ====================
    /// Document not found
    #[error("document not found: {key}")]
    DocumentNotFound { key: String },

    /// Collection not found
    #[error("collection not found: {collection}")]
    CollectionNotFound { collection: String },

    // ==================== Concurrency Errors ====================
    /// Document already exists
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// Stored version differs from the expected one
    #[error("version conflict on {key}: expected {expected}, got {actual}")]
    VersionConflict {
        key: String,
        expected: u64,
        actual: u64,
    },

    // ==================== Validation Errors ====================
    /// Collection already exists
    #[error("collection already exists: {collection}")]
    CollectionExists { collection: String },

    /// Invalid input
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Script failed to compile or run
    #[error("script error: {reason}")]
    Script { reason: String },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    // ==================== System Errors ====================
    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// HTTP-style status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::DocumentNotFound { .. } | Error::CollectionNotFound { .. } => 404,
            Error::Conflict { .. } | Error::VersionConflict { .. } => 409,
            Error::CollectionExists { .. }
            | Error::InvalidInput { .. }
            | Error::Script { .. }
            | Error::Serialization { .. } => 400,
            Error::Internal { .. } => 500,
        }
    }

    /// True for `DocumentNotFound` and `CollectionNotFound`
    pub fn is_not_found(&self) -> bool {
        self.status_code() == 404
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }
}
