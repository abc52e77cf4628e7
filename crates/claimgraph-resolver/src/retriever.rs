//! Candidate retrieval from the knowledge graph

use crate::context::NodeContext;
use crate::error::{BoxError, ResolverError};
use claimgraph_domain::traits::{KnowledgeGraphStore, RelationSimilarity};
use std::collections::HashSet;
use tracing::debug;

/// Gathers candidate entities for an unknown node
///
/// For each context pair `(entity, relation)`, the entity's out-edges are
/// filtered to the `top_k_relations` relations most similar to `relation`,
/// and their tails form one candidate group.
pub struct CandidateRetriever<'a, G, S> {
    graph: &'a G,
    sim: &'a S,
    top_k_relations: usize,
}

impl<'a, G, S> CandidateRetriever<'a, G, S>
where
    G: KnowledgeGraphStore,
    G::Error: Into<BoxError>,
    S: RelationSimilarity,
    S::Error: Into<BoxError>,
{
    /// Create a retriever keeping `top_k_relations` relations per pair
    pub fn new(graph: &'a G, sim: &'a S, top_k_relations: usize) -> Self {
        Self {
            graph,
            sim,
            top_k_relations,
        }
    }

    /// One candidate group per context pair whose entity has out-edges
    ///
    /// Groups keep KG edge order and hold each tail once.
    pub fn candidates(&self, context: &NodeContext) -> Result<Vec<Vec<String>>, ResolverError> {
        let mut groups = Vec::new();

        for pair in context.edges() {
            let edges = self
                .graph
                .out_edges(&pair.entity)
                .map_err(ResolverError::upstream)?;
            if edges.is_empty() {
                debug!("No KG edges for {:?}; skipping", pair.entity);
                continue;
            }

            let mut seen = HashSet::new();
            let relations: Vec<String> = edges
                .iter()
                .filter(|edge| seen.insert(edge.relation.as_str()))
                .map(|edge| edge.relation.clone())
                .collect();

            let kept: HashSet<String> = self
                .sim
                .top_k(&pair.relation, &relations, self.top_k_relations)
                .map_err(ResolverError::upstream)?
                .into_iter()
                .map(|(relation, _)| relation)
                .collect();

            let mut tails = HashSet::new();
            let group: Vec<String> = edges
                .iter()
                .filter(|edge| kept.contains(&edge.relation))
                .filter(|edge| tails.insert(edge.tail.as_str()))
                .map(|edge| edge.tail.clone())
                .collect();

            debug!(
                "{:?} --{}--> {} candidates via {} relations",
                pair.entity,
                pair.relation,
                group.len(),
                kept.len()
            );
            groups.push(group);
        }

        Ok(groups)
    }
}
