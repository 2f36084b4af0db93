//! Executor test modules.
