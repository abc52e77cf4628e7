//! Candidate scoring and ranking
//!
//! A candidate scores well when the knowledge graph connects the unknown's
//! explicit neighbors to it through relations similar to the pseudo-relations.
//!
//! ```text
//! context (A, r)    KG: A -r'-> candidate    score += sim(r, r')
//! ```
//!
//! Out-edges and relation similarities are memoized in a score table that
//! lives for one [`rank`] call, so repeated candidates and shared neighbors
//! cost one lookup each.

use crate::aggregation::Aggregation;
use crate::context::NodeContext;
use crate::error::{BoxError, ResolverError};
use claimgraph_domain::traits::{KnowledgeGraphStore, RelationSimilarity};
use claimgraph_domain::Edge;
use std::collections::HashMap;
use tracing::debug;

/// Score one candidate against a node context
///
/// For each context pair, every KG out-edge of the entity that ends at
/// `candidate` adds the similarity between the pseudo-relation and the edge's
/// relation. With `normalize` and at least one match the mean is returned,
/// otherwise the raw sum. No matching edge scores exactly `0.0`.
pub fn score<G, S>(
    candidate: &str,
    context: &NodeContext,
    graph: &G,
    sim: &S,
    normalize: bool,
) -> Result<f32, ResolverError>
where
    G: KnowledgeGraphStore,
    G::Error: Into<BoxError>,
    S: RelationSimilarity,
    S::Error: Into<BoxError>,
{
    ScoreTable::new(graph, sim).score(candidate, context, normalize)
}

/// Rank candidates gathered from several lookups
///
/// Every occurrence of every candidate is scored; the scores of a distinct
/// candidate are combined with `aggregation`. The result is sorted by
/// descending aggregated score (ties keep first-seen order) and holds at
/// most `k1` entries.
pub fn rank<G, S>(
    candidate_sets: &[Vec<String>],
    context: &NodeContext,
    graph: &G,
    sim: &S,
    k1: usize,
    normalize: bool,
    aggregation: Aggregation,
) -> Result<Vec<(String, f32)>, ResolverError>
where
    G: KnowledgeGraphStore,
    G::Error: Into<BoxError>,
    S: RelationSimilarity,
    S::Error: Into<BoxError>,
{
    let mut table = ScoreTable::new(graph, sim);
    let mut observed: Vec<(&str, Vec<f32>)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for candidate in candidate_sets.iter().flatten() {
        let value = table.score(candidate, context, normalize)?;
        match slots.get(candidate.as_str()) {
            Some(&slot) => observed[slot].1.push(value),
            None => {
                slots.insert(candidate.as_str(), observed.len());
                observed.push((candidate.as_str(), vec![value]));
            }
        }
    }

    let mut ranked: Vec<(String, f32)> = observed
        .into_iter()
        .map(|(candidate, scores)| (candidate.to_string(), aggregation.apply(&scores)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k1);

    debug!(
        "Ranked {} distinct candidates by {} (kept {})",
        slots.len(),
        aggregation,
        ranked.len()
    );
    Ok(ranked)
}

/// Per-call memo of KG lookups, similarities and candidate scores
pub(crate) struct ScoreTable<'a, G, S> {
    graph: &'a G,
    sim: &'a S,
    edges: HashMap<String, Vec<Edge>>,
    similarities: HashMap<(String, String), f32>,
    scores: HashMap<(String, bool), f32>,
}

impl<'a, G, S> ScoreTable<'a, G, S>
where
    G: KnowledgeGraphStore,
    G::Error: Into<BoxError>,
    S: RelationSimilarity,
    S::Error: Into<BoxError>,
{
    /// Create an empty table over `graph` and `sim`
    pub fn new(graph: &'a G, sim: &'a S) -> Self {
        Self {
            graph,
            sim,
            edges: HashMap::new(),
            similarities: HashMap::new(),
            scores: HashMap::new(),
        }
    }

    /// Score `candidate` against `context`
    ///
    /// Candidate scores are cached per table, so a table must only ever see
    /// one context.
    pub fn score(
        &mut self,
        candidate: &str,
        context: &NodeContext,
        normalize: bool,
    ) -> Result<f32, ResolverError> {
        let key = (candidate.to_string(), normalize);
        if let Some(&cached) = self.scores.get(&key) {
            return Ok(cached);
        }

        let mut total = 0.0f32;
        let mut matches = 0usize;
        for pair in context.edges() {
            let relations: Vec<String> = self
                .out_edges(&pair.entity)?
                .iter()
                .filter(|edge| edge.tail == candidate)
                .map(|edge| edge.relation.clone())
                .collect();
            for relation in relations {
                total += self.similarity(&pair.relation, &relation)?;
                matches += 1;
            }
        }

        let value = if normalize && matches > 0 {
            total / matches as f32
        } else {
            total
        };
        self.scores.insert(key, value);
        Ok(value)
    }

    /// Out-edges of `entity`, fetched once
    pub fn out_edges(&mut self, entity: &str) -> Result<&[Edge], ResolverError> {
        if !self.edges.contains_key(entity) {
            let edges = self.graph.out_edges(entity).map_err(ResolverError::upstream)?;
            self.edges.insert(entity.to_string(), edges);
        }
        Ok(self.edges.get(entity).map(Vec::as_slice).unwrap_or_default())
    }

    fn similarity(&mut self, a: &str, b: &str) -> Result<f32, ResolverError> {
        let key = (a.to_string(), b.to_string());
        if let Some(&cached) = self.similarities.get(&key) {
            return Ok(cached);
        }
        let value = self.sim.similarity(a, b).map_err(ResolverError::upstream)?;
        self.similarities.insert(key, value);
        Ok(value)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::testing::{graph, FixedSimilarity};
    use proptest::prelude::*;

    proptest! {
        /// Property: aggregated scores do not depend on group order
        #[test]
        fn test_group_order_does_not_change_scores(
            groups in prop::collection::vec(prop::collection::vec(0usize..4, 0..4), 0..5)
        ) {
            let kg = graph(&[("A", "r", "E0"), ("A", "s", "E1"), ("A", "r", "E1"), ("A", "t", "E3")]);
            let sim = FixedSimilarity::new(0.1).with("q", "s", 0.7).with("q", "t", -0.3);
            let mut ctx = NodeContext::new();
            ctx.push("A", "q");

            let named: Vec<Vec<String>> = groups
                .iter()
                .map(|g| g.iter().map(|i| format!("E{i}")).collect())
                .collect();
            let mut reversed = named.clone();
            reversed.reverse();

            for mode in [Aggregation::Max, Aggregation::Mean, Aggregation::Sum] {
                let mut forward = rank(&named, &ctx, &kg, &sim, 10, true, mode).unwrap();
                let mut backward = rank(&reversed, &ctx, &kg, &sim, 10, true, mode).unwrap();
                forward.sort_by(|a, b| a.0.cmp(&b.0));
                backward.sort_by(|a, b| a.0.cmp(&b.0));
                prop_assert_eq!(forward.len(), backward.len());
                for (f, b) in forward.iter().zip(&backward) {
                    prop_assert_eq!(&f.0, &b.0);
                    prop_assert!((f.1 - b.1).abs() < 1e-5);
                }
            }
        }
    }
}
