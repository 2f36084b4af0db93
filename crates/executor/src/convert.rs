//! Error conversion from internal error types.
//!
//! This module provides conversions from internal docstore errors to
//! the executor's [`Error`] type.

use crate::Error;
use docstore_core::Error as CoreError;
use docstore_primitives::ScriptError;

/// Convert a core error to an executor Error.
///
/// This preserves all error details while mapping to the appropriate
/// executor error variant.
impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(key) => Error::DocumentNotFound {
                key: key.to_string(),
            },
            CoreError::Conflict(key) => Error::Conflict {
                reason: format!("document {} already exists", key),
            },
            CoreError::VersionConflict {
                key,
                expected,
                actual,
            } => Error::VersionConflict {
                key: key.to_string(),
                expected,
                actual,
            },
            CoreError::CollectionNotFound(collection) => Error::CollectionNotFound { collection },
            CoreError::CollectionExists(collection) => Error::CollectionExists { collection },
            CoreError::InvalidInput(reason) => Error::InvalidInput { reason },
            CoreError::Script(reason) => Error::Script { reason },
            CoreError::Serialization(reason) => Error::Serialization { reason },
        }
    }
}

/// Script errors map the same way as their core counterparts.
impl From<ScriptError> for Error {
    fn from(err: ScriptError) -> Self {
        Error::from(CoreError::from(err))
    }
}

/// Convert a core result into an executor result.
pub(crate) fn convert_result<T>(result: docstore_core::Result<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
