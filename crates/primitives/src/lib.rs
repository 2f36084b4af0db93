//! Primitives layer for docstore
//!
//! - **DocumentStore**: versioned documents with create, replace, partial
//!   merge and scripted read-modify-write, plus collection lifecycle
//! - **script**: the update-script language compiled into transforms for
//!   `DocumentStore::update_scripted`
//!
//! ## Design Principle: Stateless Facade
//!
//! `DocumentStore` holds only an `Arc<ShardedStore>` and its options. All
//! state lives in storage, so clones share data and can be handed to other
//! threads freely.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document_store;
pub mod script;

pub use document_store::{
    CollectionInfo, DocumentStore, GetResult, ResultCode, StoreOptions, WriteResult,
};
pub use script::{Script, ScriptError};
