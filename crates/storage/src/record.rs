//! Stored record
//!
//! The contract type `Versioned<Document>` is what readers get back. A
//! `Record` is the storage-side state behind it: the key, the document, the
//! version counter and the time of the last write.

use docstore_core::{DocKey, Document, Timestamp, Version, Versioned};

/// Stored state of one document
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    key: DocKey,
    document: Document,
    version: Version,
    updated_at: Timestamp,
}

impl Record {
    /// Create a record at the initial version
    pub fn new(key: DocKey, document: Document) -> Self {
        Record {
            key,
            document,
            version: Version::INITIAL,
            updated_at: Timestamp::now(),
        }
    }

    /// Replace the document and advance the version by one
    ///
    /// Returns the new version.
    pub fn commit(&mut self, document: Document) -> Version {
        self.document = document;
        self.version = self.version.next();
        self.updated_at = Timestamp::now();
        self.version
    }

    /// Record key
    pub fn key(&self) -> &DocKey {
        &self.key
    }

    /// Current document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Current version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Time of the last committed write
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Snapshot the current state as a contract type
    pub fn versioned(&self) -> Versioned<Document> {
        Versioned::with_timestamp(self.document.clone(), self.version, self.updated_at)
    }
}
