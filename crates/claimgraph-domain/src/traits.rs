//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the resolution logic and the
//! collaborators it depends on. Implementations live in other crates.

use crate::triplet::Edge;

/// Read-only access to a knowledge graph
///
/// Implemented by the infrastructure layer (claimgraph-store)
pub trait KnowledgeGraphStore {
    /// Error type for graph lookups
    type Error;

    /// Out-edges of `entity` in storage order; unknown entities have none
    fn out_edges(&self, entity: &str) -> Result<Vec<Edge>, Self::Error>;

    /// Whether the graph knows `entity` as a head
    fn contains_entity(&self, entity: &str) -> Result<bool, Self::Error> {
        Ok(!self.out_edges(entity)?.is_empty())
    }
}

/// Similarity between relation labels
///
/// Implemented by the infrastructure layer (claimgraph-store) on top of an
/// embedding model.
pub trait RelationSimilarity {
    /// Error type for similarity computation
    type Error;

    /// Similarity of two relation strings in `[-1, 1]`
    fn similarity(&self, a: &str, b: &str) -> Result<f32, Self::Error>;

    /// The `k` candidates most similar to `query`, best first
    ///
    /// Ties keep the candidates' original order. Fails when `candidates`
    /// is empty.
    fn top_k(
        &self,
        query: &str,
        candidates: &[String],
        k: usize,
    ) -> Result<Vec<(String, f32)>, Self::Error>;
}

/// A single text-generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// System instruction framing the task
    pub system: Option<String>,

    /// User prompt
    pub prompt: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// Create a request with default sampling settings
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            temperature: 0.3,
            max_tokens: 256,
        }
    }

    /// Attach a system instruction
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the token budget
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (claimgraph-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a completion for the request
    fn generate(&self, request: &GenerationRequest) -> Result<String, Self::Error>;
}
