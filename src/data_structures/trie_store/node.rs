//! Node implementation for the trie store.
//!
//! Each node owns its children by value, so dropping a node releases the
//! whole subtree beneath it.

use hashbrown::HashMap;

/// A node in the trie store.
///
/// Each node represents one byte position along a key path. Terminal nodes
/// carry the definition of the word spelled by the path from the root.
#[derive(Debug, Default)]
pub struct TrieNode {
    /// Map of key bytes to child nodes
    pub children: HashMap<u8, TrieNode>,

    /// Whether the path to this node spells a stored word
    pub is_terminal: bool,

    /// Definition of the word (meaningful only when `is_terminal` is set)
    pub definition: String,
}

impl TrieNode {
    /// Creates a new empty trie node.
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
            is_terminal: false,
            definition: String::new(),
        }
    }

    /// Number of nodes in the subtree rooted at this node, itself included.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }
        count
    }
}

impl Drop for TrieNode {
    // Unlink descendants onto a heap stack so deep chains drop without recursion.
    fn drop(&mut self) {
        let mut pending: Vec<TrieNode> = self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}
