//! Error module for the trie dictionary.
//!
//! Each area defines its own error enum next to its code; this module
//! aggregates them into [`DictionaryError`] so the binary can propagate
//! everything with `?`.

use std::path::PathBuf;
use thiserror::Error;

use crate::codec::CodecError;
use crate::data_structures::TrieStoreError;

pub mod config;

/// Result type alias used throughout the trie dictionary.
pub type DictionaryResult<T> = Result<T, DictionaryError>;

/// Core error enum for the trie dictionary.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors returned by the trie store (empty key, missing word).
    #[error("Dictionary error: {0}")]
    Store(#[from] TrieStoreError),

    /// The dictionary file could not be read or written.
    #[error("Storage error for {}: {source}", .path.display())]
    Storage {
        /// Path of the dictionary file
        path: PathBuf,
        /// Underlying codec failure
        #[source]
        source: CodecError,
    },

    /// A word or definition the dictionary file cannot hold.
    #[error("Invalid entry: {0}")]
    Record(#[from] CodecError),

    /// IO errors that may occur outside the dictionary file (terminal, config output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

impl DictionaryError {
    /// Wraps a codec failure with the path it happened on.
    pub fn storage<P: Into<PathBuf>>(path: P, source: CodecError) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is a lookup miss rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_not_found())
    }
}
