//! # docstore executor
//!
//! The public API for docstore - an embedded, versioned document store.
//!
//! This is the only crate users need to import. It provides:
//! - [`DocStore`] - The main store interface with typed methods
//! - [`Command`]/[`Output`] - Low-level command interface (for SDKs)
//! - [`DocStoreConfig`] - Settings read from `docstore.toml`
//!
//! ## Quick Start
//!
//! ```text
//! use docstore_executor::{DocStore, Document};
//!
//! let db = DocStore::ephemeral();
//!
//! let doc = Document::new()
//!     .with("name", "Coffee maker")
//!     .with("price", 64)
//!     .with("in_stock", 10);
//! db.create("products", Some("coffee_maker_001"), doc)?;
//!
//! db.update_script(
//!     "products",
//!     "coffee_maker_001",
//!     "if (ctx._source.in_stock > 0) { ctx._source.in_stock--; }",
//!     None,
//! )?;
//! ```
//!
//! ## Update Forms
//!
//! | Body | Effect |
//! |------|--------|
//! | `doc` | Partial merge, version + 1 |
//! | `doc` + `if_version` | Merge only at the expected version |
//! | `doc` + `doc_as_upsert` | Merge, or create from `doc` |
//! | `script` | Scripted read-modify-write, version + 1 |
//! | `script` + `upsert` | Script, or create from `upsert` |

#![warn(missing_docs)]

mod command;
mod config;
mod convert;
mod docstore;
mod error;
mod executor;
mod output;
mod types;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use command::Command;
pub use config::{DocStoreConfig, CONFIG_FILE_NAME};
pub use docstore::DocStore;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use types::*;

// Re-export core types so users don't need docstore-core directly
pub use docstore_core::{Document, Value};

// Re-export the store for callers that want closure transforms
pub use docstore_primitives::{DocumentStore, StoreOptions};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
