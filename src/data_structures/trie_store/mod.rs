// Copyright (c) 2025 Trie Dictionary Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Trie Store Implementation
//!
//! This module provides the prefix tree that backs the dictionary. Keys are
//! byte sequences: every byte of a key labels exactly one edge, and the node
//! reached after the last byte holds the word's definition.

mod error;
mod node;

pub use error::TrieStoreError;
pub use node::TrieNode;

/// Result type for trie store operations
pub type TrieStoreResult<T> = Result<T, TrieStoreError>;

/// The whole dictionary as a prefix tree.
///
/// Key features:
/// * Exact-match lookup in O(key length)
/// * Overwrite-in-place when a word is added again
/// * Pre-order traversal used for persistence
///
/// The store exclusively owns its root and, through it, every node. Nodes are
/// only created on the path of an insert and are released together when the
/// store is cleared or dropped. Nothing is ever pruned, so a node that lost
/// its purpose simply stays in the tree.
#[derive(Debug, Default)]
pub struct TrieStore {
    /// The root node, representing the empty key
    root: TrieNode,
}

impl TrieStore {
    /// Creates a new empty `TrieStore`.
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
        }
    }

    /// Inserts a word and its definition into the store.
    ///
    /// Missing edges along the key are created. If the word is already stored
    /// its definition is replaced and the tree shape is left untouched.
    ///
    /// # Arguments
    ///
    /// * `key` - The word to insert.
    /// * `definition` - The definition to associate with the word.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - `true` if a new word was inserted, `false` if an existing word was updated.
    /// * `Err(TrieStoreError::EmptyKey)` - If `key` is empty.
    pub fn insert<K, V>(&mut self, key: K, definition: V) -> TrieStoreResult<bool>
    where
        K: AsRef<[u8]>,
        V: Into<String>,
    {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(TrieStoreError::EmptyKey);
        }

        let mut node = &mut self.root;
        for &byte in key {
            node = node.children.entry(byte).or_default();
        }

        let is_new = !node.is_terminal;
        node.is_terminal = true;
        node.definition = definition.into();

        Ok(is_new)
    }

    /// Looks up the definition of a word.
    ///
    /// Never creates nodes. A key whose path breaks off and a key that only
    /// exists as a prefix of longer words both produce
    /// [`TrieStoreError::NotFound`].
    ///
    /// # Arguments
    ///
    /// * `key` - The word to look up.
    ///
    /// # Returns
    ///
    /// * `Ok(&str)` - The stored definition.
    /// * `Err(TrieStoreError)` - `NotFound` on a miss, `EmptyKey` for an empty key.
    pub fn lookup<K>(&self, key: K) -> TrieStoreResult<&str>
    where
        K: AsRef<[u8]>,
    {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(TrieStoreError::EmptyKey);
        }

        match self.descend(key) {
            Some(node) if node.is_terminal => Ok(&node.definition),
            _ => Err(TrieStoreError::not_found(key)),
        }
    }

    /// Checks whether a word is stored.
    pub fn contains<K>(&self, key: K) -> bool
    where
        K: AsRef<[u8]>,
    {
        self.lookup(key).is_ok()
    }

    /// Returns the number of stored words.
    ///
    /// This walks the entire tree, so it's an O(n) operation.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.traverse(|_, _| count += 1);
        count
    }

    /// Returns `true` if no word is stored.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty() && !self.root.is_terminal
    }

    /// Returns the number of allocated nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.subtree_size()
    }

    /// Releases every node and starts over with a fresh empty root.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
    }

    /// Visits every stored word depth-first.
    ///
    /// `visit` receives the word bytes and the definition. A terminal node is
    /// visited before any of its descendants; the order among siblings is
    /// whatever the child map yields and must not be relied upon.
    pub fn traverse<F>(&self, visit: F)
    where
        F: FnMut(&[u8], &str),
    {
        walk(&self.root, Vec::new(), visit);
    }

    /// Finds all words starting with `prefix`, sorted by word.
    ///
    /// An empty prefix returns every word. Non-UTF-8 words are decoded lossily.
    pub fn find_by_prefix<P>(&self, prefix: P) -> Vec<(String, String)>
    where
        P: AsRef<[u8]>,
    {
        let prefix = prefix.as_ref();
        let mut result = Vec::new();

        if let Some(start) = self.descend(prefix) {
            walk(start, prefix.to_vec(), |word, definition| {
                result.push((
                    String::from_utf8_lossy(word).into_owned(),
                    definition.to_string(),
                ));
            });
        }

        result.sort();
        result
    }

    /// Follows `key` from the root without creating anything.
    fn descend(&self, key: &[u8]) -> Option<&TrieNode> {
        key.iter()
            .try_fold(&self.root, |node, byte| node.children.get(byte))
    }
}

/// Pre-order walk below `start`, whose path from the root is `word`.
///
/// Uses an explicit stack so that long keys cannot exhaust the call stack.
/// Each entry records how long the word was at the parent so the shared
/// buffer can be cut back before the entry's own byte is appended.
fn walk<F>(start: &TrieNode, mut word: Vec<u8>, mut visit: F)
where
    F: FnMut(&[u8], &str),
{
    let base = word.len();
    let mut stack: Vec<(usize, Option<u8>, &TrieNode)> = vec![(base, None, start)];

    while let Some((parent_len, edge, node)) = stack.pop() {
        word.truncate(parent_len);
        if let Some(byte) = edge {
            word.push(byte);
        }

        if node.is_terminal {
            visit(&word, &node.definition);
        }

        let depth = word.len();
        for (&byte, child) in &node.children {
            stack.push((depth, Some(byte), child));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn collect(store: &TrieStore) -> HashMap<Vec<u8>, String> {
        let mut words = HashMap::new();
        store.traverse(|word, definition| {
            words.insert(word.to_vec(), definition.to_string());
        });
        words
    }

    #[test]
    fn test_store_basic_operations() {
        let mut store = TrieStore::new();

        assert!(store.is_empty());
        assert_eq!(store.len(), 0);

        assert!(store.insert("hello", "a greeting").unwrap());
        assert!(store.insert("help", "assistance").unwrap());
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());

        assert_eq!(store.lookup("hello").unwrap(), "a greeting");
        assert_eq!(store.lookup("help").unwrap(), "assistance");
        assert!(store.lookup("hel").unwrap_err().is_not_found());
        assert!(store.lookup("helpful").unwrap_err().is_not_found());
        assert!(store.lookup("world").unwrap_err().is_not_found());
        assert!(store.contains("hello"));
        assert!(!store.contains("hell"));
    }

    #[test]
    fn test_overwrite_keeps_structure() {
        let mut store = TrieStore::new();

        assert!(store.insert("word", "first").unwrap());
        let nodes = store.node_count();

        assert!(!store.insert("word", "second").unwrap());
        assert_eq!(store.lookup("word").unwrap(), "second");
        assert_eq!(store.len(), 1);
        assert_eq!(store.node_count(), nodes);
    }

    #[test]
    fn test_idempotent_insert() {
        let mut once = TrieStore::new();
        once.insert("apple", "fruit").unwrap();

        let mut twice = TrieStore::new();
        twice.insert("apple", "fruit").unwrap();
        twice.insert("apple", "fruit").unwrap();

        assert_eq!(collect(&once), collect(&twice));
        assert_eq!(once.node_count(), twice.node_count());
    }

    #[test]
    fn test_prefix_distinction() {
        let mut store = TrieStore::new();
        store.insert("cat", "feline").unwrap();

        assert!(store.lookup("ca").unwrap_err().is_not_found());
        assert!(store.lookup("cats").unwrap_err().is_not_found());

        store.insert("cats", "several felines").unwrap();
        assert_eq!(store.lookup("cats").unwrap(), "several felines");
        assert_eq!(store.lookup("cat").unwrap(), "feline");
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut store = TrieStore::new();

        assert_eq!(store.insert("", "nothing"), Err(TrieStoreError::EmptyKey));
        assert_eq!(store.lookup(""), Err(TrieStoreError::EmptyKey));
        assert!(store.is_empty());
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn test_lookup_does_not_create_nodes() {
        let mut store = TrieStore::new();
        store.insert("abc", "letters").unwrap();
        let nodes = store.node_count();

        let _ = store.lookup("abcdef");
        let _ = store.lookup("xyz");
        assert_eq!(store.node_count(), nodes);
    }

    #[test]
    fn test_clear() {
        let mut store = TrieStore::new();
        store.clear();
        assert!(store.is_empty());

        store.insert("one", "1").unwrap();
        store.insert("two", "2").unwrap();
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.node_count(), 1);
        assert!(store.lookup("one").unwrap_err().is_not_found());

        store.insert("three", "3").unwrap();
        assert_eq!(store.lookup("three").unwrap(), "3");
    }

    #[test]
    fn test_traverse_visits_parent_before_children() {
        let mut store = TrieStore::new();
        store.insert("a", "first").unwrap();
        store.insert("ab", "second").unwrap();
        store.insert("abc", "third").unwrap();
        store.insert("b", "fourth").unwrap();

        let mut order = Vec::new();
        store.traverse(|word, _| order.push(word.to_vec()));

        assert_eq!(order.len(), 4);
        let pos = |w: &str| order.iter().position(|x| x == w.as_bytes()).unwrap();
        assert!(pos("a") < pos("ab"));
        assert!(pos("ab") < pos("abc"));
    }

    #[test]
    fn test_traverse_reports_all_words() {
        let mut store = TrieStore::new();
        let words = ["tea", "ten", "to", "inn", "in", "i"];
        for word in words {
            store.insert(word, format!("def of {word}")).unwrap();
        }

        let collected = collect(&store);
        assert_eq!(collected.len(), words.len());
        for word in words {
            assert_eq!(collected[word.as_bytes()], format!("def of {word}"));
        }
    }

    #[test]
    fn test_byte_keys() {
        let mut store = TrieStore::new();
        store.insert([0xffu8, 0x00, 0x7f], "raw bytes").unwrap();
        store.insert("héllo", "accented").unwrap();

        assert_eq!(store.lookup([0xffu8, 0x00, 0x7f]).unwrap(), "raw bytes");
        assert_eq!(store.lookup("héllo").unwrap(), "accented");
        // Multi-byte characters occupy one edge per byte.
        assert_eq!(store.node_count(), 1 + 3 + "héllo".len());
    }

    #[test]
    fn test_find_by_prefix() {
        let mut store = TrieStore::new();
        store.insert("apple", "fruit").unwrap();
        store.insert("application", "software").unwrap();
        store.insert("apply", "verb").unwrap();
        store.insert("banana", "yellow").unwrap();

        let results = store.find_by_prefix("app");
        assert_eq!(
            results,
            vec![
                ("apple".to_string(), "fruit".to_string()),
                ("application".to_string(), "software".to_string()),
                ("apply".to_string(), "verb".to_string()),
            ]
        );

        assert_eq!(store.find_by_prefix("apple").len(), 1);
        assert_eq!(store.find_by_prefix("").len(), 4);
        assert!(store.find_by_prefix("orange").is_empty());
    }

    #[test]
    fn test_very_long_key() {
        let mut store = TrieStore::new();
        let key = "x".repeat(100_000);
        store.insert(&key, "long").unwrap();

        assert_eq!(store.lookup(&key).unwrap(), "long");
        assert_eq!(store.len(), 1);
    }
}
