//! Output enum for command results.

use serde::{Deserialize, Serialize};

use crate::types::{CollectionInfoResponse, GetResponse, WriteResponse};

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
///
/// # Example
///
/// ```text
/// use docstore_executor::{Command, Output, Executor};
///
/// match executor.execute(Command::Get { collection, id })? {
///     Output::Get(doc) => println!("{:?}", doc.source),
///     _ => unreachable!("Get always returns Get"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Document write result
    Write(WriteResponse),

    /// Document read result
    Get(GetResponse),

    /// Boolean result
    Bool(bool),

    /// Count result
    Count(u64),

    /// Acknowledged collection operation
    Acknowledged,

    /// Collection summary
    CollectionInfo(CollectionInfoResponse),

    /// Collection names
    Collections(Vec<String>),
}
