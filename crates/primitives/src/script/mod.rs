//! Update scripts
//!
//! A small expression language for read-modify-write updates. A script sees
//! the stored document as `ctx._source` and caller parameters as `params`:
//!
//! ```text
//! if (ctx._source.in_stock > 0) { ctx._source.in_stock--; }
//! ctx._source.price *= params.factor;
//! ```
//!
//! Scripts are compiled once and can run any number of times. Execution
//! works on a copy of the document and either returns the complete new
//! document or fails without side effects.

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;

use std::str::FromStr;

use docstore_core::Document;
use thiserror::Error;

use self::ast::Stmt;

/// The only script language accepted
pub const DEFAULT_LANG: &str = "painless";

/// Script compilation or execution failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    /// Source text did not parse
    #[error("parse error at offset {pos}: {message}")]
    Parse {
        /// Byte offset in the source
        pos: usize,
        /// What went wrong
        message: String,
    },

    /// Script failed while running
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Requested language is not supported
    #[error("unsupported script language '{0}'")]
    UnsupportedLang(String),
}

impl ScriptError {
    pub(crate) fn parse(pos: usize, message: impl Into<String>) -> Self {
        ScriptError::Parse {
            pos,
            message: message.into(),
        }
    }

    pub(crate) fn runtime(message: impl Into<String>) -> Self {
        ScriptError::Runtime(message.into())
    }
}

impl From<ScriptError> for docstore_core::Error {
    fn from(e: ScriptError) -> Self {
        match e {
            ScriptError::UnsupportedLang(_) => docstore_core::Error::InvalidInput(e.to_string()),
            _ => docstore_core::Error::Script(e.to_string()),
        }
    }
}

/// Check that a script language is supported
pub fn check_lang(lang: &str) -> Result<(), ScriptError> {
    if lang == DEFAULT_LANG {
        Ok(())
    } else {
        Err(ScriptError::UnsupportedLang(lang.to_string()))
    }
}

/// A compiled update script
#[derive(Debug, Clone)]
pub struct Script {
    source: String,
    program: Vec<Stmt>,
}

impl Script {
    /// Compile script source
    pub fn compile(source: impl Into<String>) -> Result<Self, ScriptError> {
        let source = source.into();
        let program = parser::parse(&source)?;
        Ok(Script { source, program })
    }

    /// Source text the script was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Run the script against `document`
    ///
    /// Returns the updated document; `document` itself is not modified.
    pub fn execute(&self, document: &Document, params: &Document) -> Result<Document, ScriptError> {
        eval::run(&self.program, document, params)
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Script::compile(s)
    }
}
