//! Core types for docstore
//!
//! This crate defines the foundational types used throughout the system:
//! - CollectionName, DocumentId, DocKey: record addressing
//! - Value: field value model
//! - Document: field mapping stored in a record
//! - Version, Timestamp, Versioned<T>: versioning contract
//! - Limits: identifier and nesting rules
//! - Error: error type shared by the storage and primitive layers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod document;
pub mod error;
pub mod limits;
pub mod types;
pub mod value;

pub use contract::{Timestamp, Version, Versioned};
pub use document::Document;
pub use error::{Error, Result};
pub use limits::LimitError;
pub use types::{CollectionName, DocKey, DocumentId};
pub use value::Value;
