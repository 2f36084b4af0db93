//! Document version counter
//!
//! Every record carries a version. Creation produces version 1 and every
//! successful mutation produces exactly the next value. Versions are never
//! decremented and never reused for the same key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-document mutation counter
///
/// ## Invariants
///
/// - The first version of a record is [`Version::INITIAL`] (1)
/// - Each successful mutation yields `previous.next()`
/// - Versions of one record are totally ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Version assigned on creation
    pub const INITIAL: Version = Version(1);

    /// Wrap a raw counter value
    pub const fn new(v: u64) -> Self {
        Version(v)
    }

    /// Get the numeric value
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// The version following this one
    ///
    /// Saturates at `u64::MAX`; a record would need 2^64 updates to get there.
    #[inline]
    pub const fn next(&self) -> Self {
        Version(self.0.saturating_add(1))
    }

    /// True for the creation version
    #[inline]
    pub const fn is_initial(&self) -> bool {
        self.0 == Self::INITIAL.0
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::INITIAL
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(v: u64) -> Self {
        Version(v)
    }
}

impl From<Version> for u64 {
    fn from(v: Version) -> Self {
        v.0
    }
}
