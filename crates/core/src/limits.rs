//! Size limits for identifiers and documents
//!
//! Identifier limits follow the conventions of search-engine style document
//! stores: collection names up to 255 bytes, document ids up to 512 bytes.
//! Document nesting depth is configurable per store.

use crate::Value;
use thiserror::Error;

/// Maximum collection name length in bytes
pub const MAX_COLLECTION_NAME_BYTES: usize = 255;

/// Maximum document id length in bytes
pub const MAX_DOCUMENT_ID_BYTES: usize = 512;

/// Default maximum nesting depth of a document
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 20;

/// Characters never allowed in a collection name
pub const FORBIDDEN_COLLECTION_CHARS: &[char] =
    &['\\', '/', '*', '?', '"', '<', '>', '|', ',', '#'];

/// Limit violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    /// Identifier is empty
    #[error("{kind} must not be empty")]
    Empty {
        /// Which identifier
        kind: &'static str,
    },

    /// Identifier exceeds its byte limit
    #[error("{kind} is {actual} bytes, limit is {max}")]
    TooLong {
        /// Which identifier
        kind: &'static str,
        /// Actual length in bytes
        actual: usize,
        /// Maximum allowed bytes
        max: usize,
    },

    /// Collection name breaks a naming rule
    #[error("invalid collection name '{name}': {reason}")]
    InvalidCollectionName {
        /// Offending name
        name: String,
        /// Rule that was broken
        reason: &'static str,
    },

    /// Document nests deeper than allowed
    #[error("document nesting depth {actual} exceeds limit {max}")]
    TooDeep {
        /// Measured depth
        actual: usize,
        /// Configured limit
        max: usize,
    },
}

/// Validate a collection name
pub fn validate_collection_name(name: &str) -> Result<(), LimitError> {
    if name.is_empty() {
        return Err(LimitError::Empty {
            kind: "collection name",
        });
    }
    if name.len() > MAX_COLLECTION_NAME_BYTES {
        return Err(LimitError::TooLong {
            kind: "collection name",
            actual: name.len(),
            max: MAX_COLLECTION_NAME_BYTES,
        });
    }
    let invalid = |reason| LimitError::InvalidCollectionName {
        name: name.to_string(),
        reason,
    };
    if name == "." || name == ".." {
        return Err(invalid("must not be '.' or '..'"));
    }
    if name.starts_with(['_', '-', '+']) {
        return Err(invalid("must not start with '_', '-' or '+'"));
    }
    if name.chars().any(|c| c.is_uppercase()) {
        return Err(invalid("must be lowercase"));
    }
    if name
        .chars()
        .any(|c| c.is_whitespace() || FORBIDDEN_COLLECTION_CHARS.contains(&c))
    {
        return Err(invalid("contains a forbidden character"));
    }
    Ok(())
}

/// Validate a document id
pub fn validate_document_id(id: &str) -> Result<(), LimitError> {
    if id.is_empty() {
        return Err(LimitError::Empty { kind: "document id" });
    }
    if id.len() > MAX_DOCUMENT_ID_BYTES {
        return Err(LimitError::TooLong {
            kind: "document id",
            actual: id.len(),
            max: MAX_DOCUMENT_ID_BYTES,
        });
    }
    Ok(())
}

/// Validate the nesting depth of a set of field values
///
/// A flat document has depth 1; every nested object or array adds one.
pub fn validate_depth<'a>(
    fields: impl IntoIterator<Item = &'a Value>,
    max: usize,
) -> Result<(), LimitError> {
    let depth = 1 + fields.into_iter().map(Value::nesting_depth).max().unwrap_or(0);
    if depth > max {
        return Err(LimitError::TooDeep { actual: depth, max });
    }
    Ok(())
}
