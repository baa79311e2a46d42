//! Character trie for autocomplete.
//!
//! Texts are normalized (trimmed, lowercased) and stored one node per
//! character. Each terminal node holds the items indexed under that exact
//! text, so a query walks the prefix and then collects every item at or
//! below the prefix node.
//!
//! ## Usage
//!
//! ```
//! use syncup_core::search::PrefixIndex;
//!
//! let mut index = PrefixIndex::new();
//! index.insert("Bohemian Rhapsody", 1u64);
//! index.insert("Queen", 1u64);
//!
//! assert_eq!(index.query("bo"), vec![1]);
//! assert_eq!(index.query("QUE"), vec![1]);
//! assert!(index.query("xyz").is_empty());
//! ```
//!
//! Removing the last item under a text prunes every node of its branch that
//! no longer leads to an item, so the trie does not grow with churn.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

#[derive(Debug)]
struct TrieNode<T> {
    children: BTreeMap<char, TrieNode<T>>,
    items: Vec<T>,
}

impl<T> Default for TrieNode<T> {
    fn default() -> Self {
        TrieNode {
            children: BTreeMap::new(),
            items: Vec::new(),
        }
    }
}

impl<T> TrieNode<T> {
    fn is_word_end(&self) -> bool {
        !self.items.is_empty()
    }

    fn is_dead(&self) -> bool {
        self.items.is_empty() && self.children.is_empty()
    }

    fn count_nodes(&self) -> usize {
        1 + self
            .children
            .values()
            .map(TrieNode::count_nodes)
            .sum::<usize>()
    }
}

fn normalize(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_lowercase())
    }
}

#[derive(Debug)]
pub struct PrefixIndex<T> {
    root: TrieNode<T>,
    entries: usize,
}

impl<T> Default for PrefixIndex<T> {
    fn default() -> Self {
        PrefixIndex {
            root: TrieNode::default(),
            entries: 0,
        }
    }
}

impl<T: Clone + Eq + Hash> PrefixIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes `item` under `text`. Blank texts are ignored.
    ///
    /// Returns false if the item was already indexed under the same text.
    pub fn insert(&mut self, text: &str, item: T) -> bool {
        let Some(normalized) = normalize(text) else {
            return false;
        };
        let mut node = &mut self.root;
        for c in normalized.chars() {
            node = node.children.entry(c).or_default();
        }
        if node.items.contains(&item) {
            return false;
        }
        node.items.push(item);
        self.entries += 1;
        true
    }

    /// Removes `item` from under `text`. Returns false if it was not there.
    pub fn remove(&mut self, text: &str, item: &T) -> bool {
        let Some(normalized) = normalize(text) else {
            return false;
        };
        let chars: Vec<char> = normalized.chars().collect();
        let removed = Self::remove_from(&mut self.root, &chars, item);
        if removed {
            self.entries -= 1;
        }
        removed
    }

    fn remove_from(node: &mut TrieNode<T>, path: &[char], item: &T) -> bool {
        let Some((first, rest)) = path.split_first() else {
            let before = node.items.len();
            node.items.retain(|existing| existing != item);
            return node.items.len() != before;
        };
        let Some(child) = node.children.get_mut(first) else {
            return false;
        };
        let removed = Self::remove_from(child, rest, item);
        if removed && child.is_dead() {
            node.children.remove(first);
        }
        removed
    }

    /// Every item indexed under a text starting with `prefix`, case-insensitive.
    ///
    /// Each item appears once even if several of its texts match.
    pub fn query(&self, prefix: &str) -> Vec<T> {
        let Some(normalized) = normalize(prefix) else {
            return Vec::new();
        };
        let mut node = &self.root;
        for c in normalized.chars() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if current.is_word_end() {
                for item in &current.items {
                    if seen.insert(item.clone()) {
                        results.push(item.clone());
                    }
                }
            }
            // Reverse so that children are visited in character order.
            stack.extend(current.children.values().rev());
        }
        results
    }

    /// True if some text was indexed exactly as `text`.
    pub fn contains_text(&self, text: &str) -> bool {
        let Some(normalized) = normalize(text) else {
            return false;
        };
        let mut node = &self.root;
        for c in normalized.chars() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.is_word_end()
    }

    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.entries = 0;
    }

    /// Number of (text, item) pairs currently indexed.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }
}
