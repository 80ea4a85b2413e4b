//! Trie Dictionary Library
//!
//! A persistent word/definition store backed by a prefix tree. The library
//! holds the tree itself, the flat file codec that persists it, the file
//! binding and the interactive session used by the binary.
//!
//! # Architecture
//!
//! - [`data_structures::TrieStore`] owns every node; insert, lookup, clear, traverse
//! - [`codec::flat_file`] turns a store into `word,definition` lines and back
//! - [`storage::DictionaryFile`] loads and saves a store at a path
//! - [`session`] drives a store from a text menu
//!
//! There is no process-wide state: callers construct the store and pass it on.

pub mod codec;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod session;
pub mod storage;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the trie dictionary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
