//! Generic versioned wrapper type
//!
//! ## The Contract
//!
//! ```text
//! fn get(&self, ...) -> Result<Versioned<Document>>
//! fn update(&self, ...) -> Result<Version>
//! ```
//!
//! - Reads return `Versioned<T>` (value + version + timestamp)
//! - Writes return the `Version` they created

use super::{Timestamp, Version};
use serde::{Deserialize, Serialize};

/// A value with its version information
///
/// ## Invariants
///
/// - `version` matches the mutation that produced `value`
/// - `timestamp` is the time of that mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// The actual value
    pub value: T,

    /// Version identifier
    pub version: Version,

    /// Time the version was written
    pub timestamp: Timestamp,
}

impl<T> Versioned<T> {
    /// Create a new versioned value stamped now
    pub fn new(value: T, version: Version) -> Self {
        Versioned {
            value,
            version,
            timestamp: Timestamp::now(),
        }
    }

    /// Create a versioned value with explicit timestamp
    pub fn with_timestamp(value: T, version: Version, timestamp: Timestamp) -> Self {
        Versioned {
            value,
            version,
            timestamp,
        }
    }

    /// Map the inner value to a new type
    pub fn map<U, F>(self, f: F) -> Versioned<U>
    where
        F: FnOnce(T) -> U,
    {
        Versioned {
            value: f(self.value),
            version: self.version,
            timestamp: self.timestamp,
        }
    }

    /// Get a reference to the inner value
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consume and return the inner value
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Get the version
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Get the timestamp
    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
