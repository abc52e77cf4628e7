//! Test doubles shared by the unit tests

use claimgraph_domain::traits::RelationSimilarity;
use claimgraph_domain::Triplet;
use claimgraph_store::MemoryGraph;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn graph(edges: &[(&str, &str, &str)]) -> MemoryGraph {
    MemoryGraph::from_triplets(edges.iter().map(|(h, r, t)| Triplet::new(*h, *r, *t)))
}

#[derive(Debug)]
pub struct StubError(String);

impl fmt::Display for StubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StubError {}

/// Similarity with scripted scores and a fallback
pub struct FixedSimilarity {
    fallback: f32,
    scores: HashMap<(String, String), f32>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl FixedSimilarity {
    pub fn new(fallback: f32) -> Self {
        Self {
            fallback,
            scores: HashMap::new(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(0.0)
        }
    }

    pub fn with(mut self, a: &str, b: &str, score: f32) -> Self {
        self.scores.insert((a.to_string(), b.to_string()), score);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RelationSimilarity for FixedSimilarity {
    type Error = StubError;

    fn similarity(&self, a: &str, b: &str) -> Result<f32, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(StubError(message.clone()));
        }
        Ok(self
            .scores
            .get(&(a.to_string(), b.to_string()))
            .copied()
            .unwrap_or(self.fallback))
    }

    fn top_k(
        &self,
        query: &str,
        candidates: &[String],
        k: usize,
    ) -> Result<Vec<(String, f32)>, Self::Error> {
        let mut scored = candidates
            .iter()
            .map(|c| Ok((c.clone(), self.similarity(query, c)?)))
            .collect::<Result<Vec<_>, StubError>>()?;
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);
        Ok(scored)
    }
}
