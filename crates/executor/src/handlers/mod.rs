//! Command handlers organized by category.
//!
//! | Module | Commands | Primitive |
//! |--------|----------|-----------|
//! | `document` | 4 | DocumentStore reads and writes |
//! | `collection` | 4 | DocumentStore collection lifecycle |

pub mod collection;
pub mod document;

use docstore_core::{CollectionName, DocumentId};

use crate::convert::convert_result;
use crate::Result;

/// Validate a collection name from a command
pub(crate) fn collection_name(name: &str) -> Result<CollectionName> {
    convert_result(CollectionName::new(name))
}

/// Validate a document id from a command
pub(crate) fn document_id(id: &str) -> Result<DocumentId> {
    convert_result(DocumentId::new(id))
}
