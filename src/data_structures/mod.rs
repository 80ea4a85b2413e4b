//! Data structures for the trie dictionary.
//!
//! The only structure is the prefix tree holding words and definitions.
//! Implementations use no unsafe code and own their nodes outright.

pub mod trie_store;

// Re-export common data structures
pub use trie_store::{TrieNode, TrieStore, TrieStoreError, TrieStoreResult};
