//! In-memory knowledge graph

use crate::trie::EntityTrie;
use claimgraph_domain::traits::KnowledgeGraphStore;
use claimgraph_domain::{Edge, RelationToken, Triplet};
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;

/// Size summary of a knowledge graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphStats {
    /// Entities with at least one out-edge
    pub heads: usize,

    /// Distinct entities appearing anywhere
    pub entities: usize,

    /// Stored edges
    pub edges: usize,

    /// Distinct relation labels
    pub relations: usize,
}

/// Adjacency-map knowledge graph held entirely in memory
///
/// Out-edges are reported in insertion order. Duplicate edges are ignored.
///
/// # Examples
///
/// ```
/// use claimgraph_domain::traits::KnowledgeGraphStore;
/// use claimgraph_domain::{Edge, Triplet};
/// use claimgraph_store::MemoryGraph;
///
/// let graph = MemoryGraph::from_triplets([
///     Triplet::new("Hue", "country", "Vietnam"),
///     Triplet::new("Hanoi", "capital_of", "Vietnam"),
/// ])
/// .with_inverse_edges();
///
/// let edges = graph.out_edges("Vietnam").unwrap();
/// assert_eq!(edges[0], Edge::new("~country", "Hue"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    adjacency: HashMap<String, Vec<Edge>>,
    seen: HashSet<Triplet>,
    order: Vec<Triplet>,
}

impl MemoryGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from triplets
    pub fn from_triplets<I>(triplets: I) -> Self
    where
        I: IntoIterator<Item = Triplet>,
    {
        let mut graph = Self::new();
        for triplet in triplets {
            graph.add(triplet);
        }
        graph
    }

    /// Add one edge; returns false when it was already present
    pub fn add(&mut self, triplet: Triplet) -> bool {
        if !self.seen.insert(triplet.clone()) {
            return false;
        }
        self.adjacency
            .entry(triplet.head.clone())
            .or_default()
            .push(Edge::new(triplet.relation.clone(), triplet.tail.clone()));
        self.order.push(triplet);
        true
    }

    /// Add a `~relation` edge from tail to head for every forward edge
    ///
    /// Lets lookups from the tail side see incoming relations the way
    /// inverse evidence tokens name them.
    pub fn with_inverse_edges(mut self) -> Self {
        let forward: Vec<Triplet> = self
            .order
            .iter()
            .filter(|t| !RelationToken::parse(&t.relation).is_inverse())
            .cloned()
            .collect();
        for t in forward {
            let inverse = RelationToken::inverse(t.relation.as_str()).to_string();
            self.add(Triplet::new(t.tail, inverse, t.head));
        }
        self
    }

    /// All stored edges in insertion order
    pub fn triplets(&self) -> &[Triplet] {
        &self.order
    }

    /// Distinct entity names, sorted
    pub fn entity_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .order
            .iter()
            .flat_map(|t| [t.head.clone(), t.tail.clone()])
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        names.sort();
        names
    }

    /// Prefix index over [`entity_names`](Self::entity_names)
    pub fn entity_trie(&self) -> EntityTrie {
        EntityTrie::from_names(self.entity_names())
    }

    /// Counts of heads, entities, edges and relation labels
    pub fn stats(&self) -> GraphStats {
        let relations: HashSet<&str> = self.order.iter().map(|t| t.relation.as_str()).collect();
        GraphStats {
            heads: self.adjacency.len(),
            entities: self.entity_names().len(),
            edges: self.order.len(),
            relations: relations.len(),
        }
    }
}

impl KnowledgeGraphStore for MemoryGraph {
    type Error = Infallible;

    fn out_edges(&self, entity: &str) -> Result<Vec<Edge>, Self::Error> {
        Ok(self.adjacency.get(entity).cloned().unwrap_or_default())
    }

    fn contains_entity(&self, entity: &str) -> Result<bool, Self::Error> {
        Ok(self.adjacency.contains_key(entity))
    }
}
