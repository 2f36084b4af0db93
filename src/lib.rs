//! docstore - Embedded versioned document store
//!
//! Documents live in named collections and carry a version that starts at 1
//! and grows by one with every successful write. Updates come in three
//! forms: partial merges, scripted read-modify-write, and upserts.
//!
//! # Quick Start
//!
//! ```ignore
//! use docstore::{DocStore, Document};
//!
//! let db = DocStore::ephemeral();
//!
//! db.create(
//!     "products",
//!     Some("coffee_maker_001"),
//!     Document::new().with("name", "Coffee maker").with("in_stock", 10),
//! )?;
//!
//! db.update_script(
//!     "products",
//!     "coffee_maker_001",
//!     "if (ctx._source.in_stock > 0) { ctx._source.in_stock--; }",
//!     None,
//! )?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`] which provides a command-based API.
//! The [`DocStore`] struct provides a convenient high-level interface.
//!
//! Storage internals are not exposed; only the executor API is public.

// Re-export the public API from docstore-executor
pub use docstore_executor::*;
