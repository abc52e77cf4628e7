//! Prefix index over knowledge-graph entity names
//!
//! Built from a graph's `entity_names()` and grown with the entities a
//! dataset pass collects, so callers can check membership or complete a
//! partial entity mention against what the graph actually knows.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Node {
    children: BTreeMap<char, Node>,
    terminal: bool,
}

/// Character trie of entity names
///
/// Completions come back in lexicographic order.
///
/// # Examples
///
/// ```
/// use claimgraph_store::EntityTrie;
///
/// let trie = EntityTrie::from_names(["Hanoi", "Hue", "Ha_Long"]);
/// assert!(trie.contains("Hue"));
/// assert!(!trie.contains("Hu"));
/// assert_eq!(trie.with_prefix("Ha"), vec!["Ha_Long", "Hanoi"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityTrie {
    root: Node,
    len: usize,
}

impl EntityTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie from names; duplicates are stored once
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        trie.extend(names);
        trie
    }

    /// Insert a name; returns false when it was already present
    pub fn insert(&mut self, name: &str) -> bool {
        let mut node = &mut self.root;
        for c in name.chars() {
            node = node.children.entry(c).or_default();
        }
        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.len += 1;
        true
    }

    /// Insert every name from an iterator
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.insert(name.as_ref());
        }
    }

    /// Whether `name` was inserted as a whole entity
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some_and(|node| node.terminal)
    }

    /// Whether some entity starts with `prefix`
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.find(prefix).is_some()
    }

    /// Every entity starting with `prefix`, sorted
    pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(node) = self.find(prefix) {
            let mut buffer = prefix.to_string();
            collect(node, &mut buffer, &mut names);
        }
        names
    }

    /// Number of distinct entities
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the trie holds no entity
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn find(&self, prefix: &str) -> Option<&Node> {
        prefix
            .chars()
            .try_fold(&self.root, |node, c| node.children.get(&c))
    }
}

fn collect(node: &Node, buffer: &mut String, out: &mut Vec<String>) {
    if node.terminal {
        out.push(buffer.clone());
    }
    for (c, child) in &node.children {
        buffer.push(*c);
        collect(child, buffer, out);
        buffer.pop();
    }
}
