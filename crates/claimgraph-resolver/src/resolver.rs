//! Placeholder resolution over a pseudo-subgraph

use crate::config::ResolverConfig;
use crate::context::{placeholder_contexts, NodeContext};
use crate::error::{BoxError, ResolverError};
use crate::retriever::CandidateRetriever;
use crate::scorer::rank;
use claimgraph_domain::traits::{KnowledgeGraphStore, RelationSimilarity};
use claimgraph_domain::{is_placeholder, Triplet};
use std::collections::HashSet;
use tracing::{debug, info};

/// Ranked knowledge-graph entities for one placeholder
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Placeholder identifier (`unknown_<i>`)
    pub placeholder: String,

    /// Explicit neighbors the ranking was based on
    pub context: NodeContext,

    /// Candidates with aggregated scores, best first
    pub ranked: Vec<(String, f32)>,
}

impl Resolution {
    /// Highest-ranked candidate, if any
    pub fn best(&self) -> Option<&str> {
        self.ranked.first().map(|(entity, _)| entity.as_str())
    }

    /// Whether no candidate was found
    pub fn is_unresolved(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Resolves the placeholders of pseudo-subgraphs against a knowledge graph
///
/// # Examples
///
/// ```
/// use claimgraph_domain::Triplet;
/// use claimgraph_resolver::{Resolver, ResolverConfig};
/// use claimgraph_store::{EmbeddingSimilarity, MemoryGraph, MockEmbeddingModel};
///
/// let graph = MemoryGraph::from_triplets([
///     Triplet::new("Hue", "country", "Vietnam"),
///     Triplet::new("Hue", "leader", "Nguyen"),
/// ]);
/// let sim = EmbeddingSimilarity::new(MockEmbeddingModel::new(128));
/// let resolver = Resolver::new(graph, sim, ResolverConfig::default()).unwrap();
///
/// let pseudo = vec![Triplet::new("Hue", "country", "unknown_0")];
/// let resolutions = resolver.resolve(&pseudo).unwrap();
/// assert_eq!(resolutions[0].best(), Some("Vietnam"));
/// ```
pub struct Resolver<G, S> {
    graph: G,
    sim: S,
    config: ResolverConfig,
}

impl<G, S> Resolver<G, S>
where
    G: KnowledgeGraphStore,
    G::Error: Into<BoxError>,
    S: RelationSimilarity,
    S::Error: Into<BoxError>,
{
    /// Create a resolver; fails when `config` does not validate
    pub fn new(graph: G, sim: S, config: ResolverConfig) -> Result<Self, ResolverError> {
        config.validate().map_err(ResolverError::InvalidArgument)?;
        Ok(Self { graph, sim, config })
    }

    /// The knowledge graph
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// The relation similarity service
    pub fn similarity(&self) -> &S {
        &self.sim
    }

    /// Active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Rank candidates for every placeholder in `triplets`
    ///
    /// Placeholders appear in first-seen order. A placeholder without
    /// explicit neighbors, or whose neighbors lead nowhere, gets an empty
    /// ranking.
    pub fn resolve(&self, triplets: &[Triplet]) -> Result<Vec<Resolution>, ResolverError> {
        let retriever = CandidateRetriever::new(&self.graph, &self.sim, self.config.top_k_relations);
        let mut resolutions = Vec::new();

        for (placeholder, context) in placeholder_contexts(triplets) {
            let groups = retriever.candidates(&context)?;
            let ranked = rank(
                &groups,
                &context,
                &self.graph,
                &self.sim,
                self.config.top_k_candidates,
                self.config.normalize,
                self.config.aggregation,
            )?;
            debug!(
                "{}: {} context pairs, {} groups, best {:?}",
                placeholder,
                context.len(),
                groups.len(),
                ranked.first().map(|(entity, _)| entity)
            );
            resolutions.push(Resolution {
                placeholder,
                context,
                ranked,
            });
        }

        info!(
            "Resolved {}/{} placeholders",
            resolutions.iter().filter(|r| !r.is_unresolved()).count(),
            resolutions.len()
        );
        Ok(resolutions)
    }
}

/// Replace placeholders by their ranked entities
///
/// Each triplet is expanded once per ranked entity of every placeholder it
/// touches. Unresolved placeholders stay as they are. The output is
/// deduplicated keeping first occurrences.
pub fn substitute(triplets: &[Triplet], resolutions: &[Resolution]) -> Vec<Triplet> {
    let choices = |node: &str| -> Vec<String> {
        if !is_placeholder(node) {
            return vec![node.to_string()];
        }
        match resolutions.iter().find(|r| r.placeholder == node) {
            Some(resolution) if !resolution.is_unresolved() => resolution
                .ranked
                .iter()
                .map(|(entity, _)| entity.clone())
                .collect(),
            _ => vec![node.to_string()],
        }
    };

    let mut seen = HashSet::new();
    let mut output = Vec::new();
    for t in triplets {
        let tails = choices(&t.tail);
        for head in choices(&t.head) {
            for tail in &tails {
                let candidate = Triplet::new(head.as_str(), t.relation.as_str(), tail.as_str());
                if seen.insert(candidate.clone()) {
                    output.push(candidate);
                }
            }
        }
    }
    output
}
