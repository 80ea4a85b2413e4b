//! Storage configuration module.
//!
//! This module defines where the dictionary file lives.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name used when nothing else is configured.
pub const DEFAULT_DICTIONARY_FILE: &str = "trie_dictionary.txt";

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Dictionary file, read at session start and rewritten at session end
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DICTIONARY_FILE),
        }
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.path cannot be empty".to_string(),
            ));
        }

        if self.path.is_dir() {
            return Err(ConfigError::ValidationError(format!(
                "storage.path points to a directory: {}",
                self.path.display()
            )));
        }

        Ok(())
    }
}
