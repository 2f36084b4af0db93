//! Executor Integration Tests
//!
//! Commands arriving as JSON, dispatched through the executor, answered with
//! the document-service response shape.

#[path = "../common/mod.rs"]
mod common;

mod command_dispatch;
mod config;
mod error_handling;
