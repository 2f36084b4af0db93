//! Store configuration via `docstore.toml`
//!
//! A store opened from a directory reads its settings from a config file in
//! that directory. On first open a commented default `docstore.toml` is
//! written. To change settings, edit the file and reopen.

use std::path::Path;

use docstore_core::limits::DEFAULT_MAX_NESTING_DEPTH;
use docstore_primitives::StoreOptions;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Config file name placed in the store directory.
pub const CONFIG_FILE_NAME: &str = "docstore.toml";

/// Store configuration loaded from `docstore.toml`.
///
/// # Example
///
/// ```toml
/// # Create collections on first write (default: true)
/// auto_create_collections = true
///
/// # Reject documents nested deeper than this (default: 20)
/// max_nesting_depth = 20
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocStoreConfig {
    /// Create unknown collections on the first document write.
    #[serde(default = "default_auto_create")]
    pub auto_create_collections: bool,
    /// Deepest accepted document nesting.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

fn default_auto_create() -> bool {
    true
}

fn default_max_nesting_depth() -> usize {
    DEFAULT_MAX_NESTING_DEPTH
}

impl Default for DocStoreConfig {
    fn default() -> Self {
        Self {
            auto_create_collections: default_auto_create(),
            max_nesting_depth: default_max_nesting_depth(),
        }
    }
}

impl DocStoreConfig {
    /// Check values that parse but make no sense.
    pub fn validate(&self) -> Result<()> {
        if self.max_nesting_depth == 0 {
            return Err(Error::InvalidInput {
                reason: format!(
                    "Invalid max_nesting_depth 0 in {}. Expected at least 1.",
                    CONFIG_FILE_NAME
                ),
            });
        }
        Ok(())
    }

    /// Options for a `DocumentStore` built from this config.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            auto_create_collections: self.auto_create_collections,
            max_nesting_depth: self.max_nesting_depth,
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# docstore configuration
#
# Create a collection automatically on the first document written to it.
# When false, writes to an unknown collection fail with CollectionNotFound.
auto_create_collections = true

# Reject documents nested deeper than this many levels (default: 20)
max_nesting_depth = 20
"#
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DocStoreConfig = toml::from_str(content).map_err(|e| Error::InvalidInput {
            reason: format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Internal {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml(&content)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::Internal {
                reason: format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ),
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Serialization {
            reason: format!("Failed to serialize config: {}", e),
        })?;
        std::fs::write(path, content).map_err(|e| Error::Internal {
            reason: format!("Failed to write config file '{}': {}", path.display(), e),
        })
    }
}
