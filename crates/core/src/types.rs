//! Core identifier types for docstore
//!
//! This module defines:
//! - CollectionName: validated name of a logical document grouping
//! - DocumentId: validated identifier of a document within a collection
//! - DocKey: composite `(collection, id)` key that addresses one record

use crate::error::{Error, Result};
use crate::limits::{validate_collection_name, validate_document_id};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Name of a collection
///
/// Collection names are lowercase and restricted to a safe character set
/// (see [`crate::limits::validate_collection_name`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionName(String);

impl CollectionName {
    /// Validate and wrap a collection name
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_collection_name(&name).map_err(|e| Error::invalid_input(e.to_string()))?;
        Ok(Self(name))
    }

    /// Borrow the name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CollectionName {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        Self::new(name)
    }
}

impl From<CollectionName> for String {
    fn from(name: CollectionName) -> Self {
        name.0
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a document within a collection
///
/// Caller-supplied ids are any non-empty string up to 512 bytes.
/// Generated ids are 22-character URL-safe base64 encodings of a random
/// UUID v4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Validate and wrap a caller-supplied id
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        validate_document_id(&id).map_err(|e| Error::invalid_input(e.to_string()))?;
        Ok(Self(id))
    }

    /// Generate a random id
    ///
    /// Uniqueness within a collection is enforced by the store, which
    /// regenerates on collision.
    pub fn generate() -> Self {
        Self(URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes()))
    }

    /// Borrow the id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentId {
    type Error = Error;

    fn try_from(id: String) -> Result<Self> {
        Self::new(id)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite key addressing one record
///
/// Format: "collection/id"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocKey {
    /// Owning collection
    pub collection: CollectionName,
    /// Document id within the collection
    pub id: DocumentId,
}

impl DocKey {
    /// Create a new key
    pub fn new(collection: CollectionName, id: DocumentId) -> Self {
        Self { collection, id }
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}
