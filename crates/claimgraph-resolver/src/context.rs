//! Immediate context of an unknown node

use crate::error::ResolverError;
use claimgraph_domain::{is_placeholder, RelationToken, Triplet};

/// One explicit neighbor of an unknown node
///
/// `relation` is read from `entity` toward the unknown: a KG edge
/// `entity -relation-> candidate` is what would confirm it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextEdge {
    /// Explicit entity next to the unknown
    pub entity: String,

    /// Pseudo-relation connecting them, possibly `~`-prefixed
    pub relation: String,
}

/// The explicit entities and pseudo-relations around one unknown node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeContext {
    edges: Vec<ContextEdge>,
}

impl NodeContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair `entities[i]` with `relations[i]`
    ///
    /// Fails with [`ResolverError::InvalidArgument`] when the lengths differ.
    pub fn from_parallel<E, R>(entities: &[E], relations: &[R]) -> Result<Self, ResolverError>
    where
        E: AsRef<str>,
        R: AsRef<str>,
    {
        if entities.len() != relations.len() {
            return Err(ResolverError::InvalidArgument(format!(
                "explicit_entities has {} items but pseudo_relations has {}",
                entities.len(),
                relations.len()
            )));
        }
        let mut context = Self::new();
        for (entity, relation) in entities.iter().zip(relations) {
            context.push(entity.as_ref(), relation.as_ref());
        }
        Ok(context)
    }

    /// Append a pair unless it is already present
    pub fn push(&mut self, entity: impl Into<String>, relation: impl Into<String>) {
        let edge = ContextEdge {
            entity: entity.into(),
            relation: relation.into(),
        };
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    /// Context pairs in insertion order
    pub fn edges(&self) -> &[ContextEdge] {
        &self.edges
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the unknown has no explicit neighbor
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Context of every placeholder in a pseudo-subgraph
///
/// `(A, r, unknown)` contributes `(A, r)`; `(unknown, r, A)` contributes
/// `(A, ~r)`, the same edge seen from `A`. Triplets between two placeholders
/// contribute nothing, but both placeholders are still listed. Placeholders
/// appear in first-seen order.
pub fn placeholder_contexts(triplets: &[Triplet]) -> Vec<(String, NodeContext)> {
    let mut contexts: Vec<(String, NodeContext)> = Vec::new();

    fn slot<'a>(contexts: &'a mut Vec<(String, NodeContext)>, name: &str) -> &'a mut NodeContext {
        let index = match contexts.iter().position(|(p, _)| p == name) {
            Some(index) => index,
            None => {
                contexts.push((name.to_string(), NodeContext::new()));
                contexts.len() - 1
            }
        };
        &mut contexts[index].1
    }

    for t in triplets {
        match (is_placeholder(&t.head), is_placeholder(&t.tail)) {
            (false, true) => slot(&mut contexts, &t.tail).push(t.head.as_str(), t.relation.as_str()),
            (true, false) => {
                let relation = RelationToken::inverse(t.relation.as_str()).to_string();
                slot(&mut contexts, &t.head).push(t.tail.as_str(), relation);
            }
            (true, true) => {
                slot(&mut contexts, &t.head);
                slot(&mut contexts, &t.tail);
            }
            (false, false) => {}
        }
    }

    contexts
}
