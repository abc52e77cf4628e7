//! Relation similarity on top of an embedding model
//!
//! Relations are compared by the cosine of their unit-normalized embeddings.
//! Batch forms encode every distinct string once and agree with the pairwise
//! form up to floating-point tolerance.

use crate::embedding::{dot, EmbeddingError, EmbeddingModel};
use claimgraph_domain::traits::RelationSimilarity;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during similarity computation
#[derive(Error, Debug)]
pub enum SimilarityError {
    /// Caller passed an unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The embedding model failed
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

/// Relation similarity service backed by an [`EmbeddingModel`]
///
/// # Examples
///
/// ```
/// use claimgraph_domain::traits::RelationSimilarity;
/// use claimgraph_store::{EmbeddingSimilarity, MockEmbeddingModel};
///
/// let sim = EmbeddingSimilarity::new(MockEmbeddingModel::new(384));
/// let candidates = vec![
///     "death place".to_string(),
///     "birth year".to_string(),
///     "place of birth".to_string(),
/// ];
///
/// let top = sim.top_k("birth place", &candidates, 2).unwrap();
/// assert_eq!(top.len(), 2);
/// assert_eq!(top[0].0, "place of birth");
/// ```
pub struct EmbeddingSimilarity<M> {
    model: M,
}

impl<M: EmbeddingModel> EmbeddingSimilarity<M> {
    /// Create a similarity service over `model`
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// The underlying embedding model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Normalized embeddings, one per input text
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SimilarityError> {
        let embeddings = self.model.encode(texts, true)?;
        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed(format!(
                "model returned {} embeddings for {} inputs",
                embeddings.len(),
                texts.len()
            ))
            .into());
        }
        Ok(embeddings)
    }

    /// Similarity of every query against every candidate
    ///
    /// Row `i` holds the scores of `queries[i]` in candidate order.
    pub fn similarity_matrix(
        &self,
        queries: &[&str],
        candidates: &[&str],
    ) -> Result<Vec<Vec<f32>>, SimilarityError> {
        let mut distinct: Vec<&str> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for text in queries.iter().chain(candidates.iter()) {
            index.entry(*text).or_insert_with(|| {
                distinct.push(*text);
                distinct.len() - 1
            });
        }

        let embeddings = self.encode(&distinct)?;
        debug!(
            "Encoded {} distinct strings for a {}x{} similarity matrix",
            distinct.len(),
            queries.len(),
            candidates.len()
        );

        Ok(queries
            .iter()
            .map(|q| {
                let query = &embeddings[index[q]];
                candidates
                    .iter()
                    .map(|c| clamp(dot(query, &embeddings[index[c]])))
                    .collect()
            })
            .collect())
    }
}

impl<M: EmbeddingModel> RelationSimilarity for EmbeddingSimilarity<M> {
    type Error = SimilarityError;

    fn similarity(&self, a: &str, b: &str) -> Result<f32, Self::Error> {
        let embeddings = self.encode(&[a, b])?;
        Ok(clamp(dot(&embeddings[0], &embeddings[1])))
    }

    fn top_k(
        &self,
        query: &str,
        candidates: &[String],
        k: usize,
    ) -> Result<Vec<(String, f32)>, Self::Error> {
        if candidates.is_empty() {
            return Err(SimilarityError::InvalidArgument(
                "Candidates list cannot be empty".to_string(),
            ));
        }

        let refs: Vec<&str> = candidates.iter().map(String::as_str).collect();
        let scores = self
            .similarity_matrix(&[query], &refs)?
            .pop()
            .unwrap_or_default();

        let mut ranked: Vec<(usize, f32)> = scores.into_iter().enumerate().collect();
        // Stable sort: equal scores keep candidate order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(ranked
            .into_iter()
            .take(k)
            .map(|(i, score)| (candidates[i].clone(), score))
            .collect())
    }
}

fn clamp(score: f32) -> f32 {
    score.clamp(-1.0, 1.0)
}
