//! Triplets, knowledge-graph edges, and placeholder identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by all placeholder identifiers
pub const PLACEHOLDER_PREFIX: &str = "unknown_";

/// Build the placeholder identifier for index `i`
///
/// ```
/// assert_eq!(claimgraph_domain::placeholder_id(2), "unknown_2");
/// ```
pub fn placeholder_id(index: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{index}")
}

/// Whether `name` is a placeholder identifier (`unknown_` followed by digits)
///
/// ```
/// use claimgraph_domain::is_placeholder;
///
/// assert!(is_placeholder("unknown_0"));
/// assert!(is_placeholder("unknown_12"));
/// assert!(!is_placeholder("unknown_soldier"));
/// assert!(!is_placeholder("unknown_"));
/// ```
pub fn is_placeholder(name: &str) -> bool {
    name.strip_prefix(PLACEHOLDER_PREFIX)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// A directed `(head, relation, tail)` edge of a pseudo-subgraph
///
/// Serialized as a JSON 3-array so augmented claim records keep the
/// `[head, relation, tail]` shape expected by downstream tooling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct Triplet {
    /// Head entity or placeholder
    pub head: String,

    /// Relation name (never carries the inverse marker)
    pub relation: String,

    /// Tail entity or placeholder
    pub tail: String,
}

impl Triplet {
    /// Create a new triplet
    pub fn new(
        head: impl Into<String>,
        relation: impl Into<String>,
        tail: impl Into<String>,
    ) -> Self {
        Self {
            head: head.into(),
            relation: relation.into(),
            tail: tail.into(),
        }
    }

    /// Whether either endpoint is a placeholder
    pub fn has_placeholder(&self) -> bool {
        is_placeholder(&self.head) || is_placeholder(&self.tail)
    }
}

impl From<(String, String, String)> for Triplet {
    fn from((head, relation, tail): (String, String, String)) -> Self {
        Self { head, relation, tail }
    }
}

impl From<Triplet> for (String, String, String) {
    fn from(t: Triplet) -> Self {
        (t.head, t.relation, t.tail)
    }
}

impl fmt::Display for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.head, self.relation, self.tail)
    }
}

/// One out-edge of a knowledge-graph entity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Relation label
    pub relation: String,

    /// Entity the edge points to
    pub tail: String,
}

impl Edge {
    /// Create a new edge
    pub fn new(relation: impl Into<String>, tail: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            tail: tail.into(),
        }
    }
}
