//! Error types for the trie store.
//!
//! This module defines the error types that can occur during trie store operations.

/// Errors that can occur in trie store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrieStoreError {
    /// Error when an empty key is provided.
    #[error("Empty key not allowed")]
    EmptyKey,

    /// The key is not a stored word, either because some prefix of it has no
    /// edge or because it only exists as a prefix of longer words.
    #[error("Word not found: {key}")]
    NotFound {
        /// The key that was looked up, decoded lossily for display.
        key: String,
    },
}

impl TrieStoreError {
    pub(crate) fn not_found(key: &[u8]) -> Self {
        Self::NotFound {
            key: String::from_utf8_lossy(key).into_owned(),
        }
    }

    /// Returns `true` for lookup misses.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
