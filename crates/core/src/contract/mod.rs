//! Contract types shared by every layer
//!
//! Two rules hold for every record in the store:
//!
//! 1. **Addressable**: a record is identified by its `DocKey`
//! 2. **Versioned**: reads return `Versioned<T>`, writes return the `Version`
//!    they produced
//!
//! ## Module Structure
//!
//! - `version`: per-document version counter
//! - `timestamp`: microsecond timestamps
//! - `versioned`: value + version + timestamp wrapper

pub mod timestamp;
pub mod version;
pub mod versioned;

pub use timestamp::Timestamp;
pub use version::Version;
pub use versioned::Versioned;
