//! Embedding Model for Relation Vectorization
//!
//! This module provides text-to-vector conversion for relation similarity.
//! Real sentence-embedding models are external collaborators; they plug in by
//! implementing [`EmbeddingModel`].
//!
//! # Provided Models
//!
//! - **MockEmbeddingModel**: Hash-based deterministic embeddings over word tokens
//! - **CachedEmbeddingModel**: Memoizes another model's embeddings per string
//!
//! # Examples
//!
//! ```rust
//! use claimgraph_store::embedding::{cosine_similarity, EmbeddingModel, MockEmbeddingModel};
//!
//! let model = MockEmbeddingModel::new(384);
//! let embedding = model.embed("birth place").unwrap();
//! assert_eq!(embedding.len(), 384);
//!
//! // Same text always produces same embedding
//! let again = model.embed("birth place").unwrap();
//! assert_eq!(embedding, again);
//!
//! // Shared words pull relations together
//! let related = model.embed("place of birth").unwrap();
//! let unrelated = model.embed("leader name").unwrap();
//! assert!(cosine_similarity(&embedding, &related) > cosine_similarity(&embedding, &unrelated));
//! ```

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur during embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Model not loaded
    #[error("Embedding model not loaded")]
    ModelNotLoaded,

    /// Invalid input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model inference error
    #[error("Model inference failed: {0}")]
    InferenceFailed(String),
}

/// Trait for embedding models
pub trait EmbeddingModel {
    /// Generate an embedding vector for the given text
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Get the dimension of embeddings produced by this model
    fn dimension(&self) -> usize;

    /// Embed a batch of texts, optionally scaling each vector to unit length
    ///
    /// Normalized vectors are comparable by dot product.
    fn encode(&self, texts: &[&str], normalize: bool) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts
            .iter()
            .map(|text| {
                let mut embedding = self.embed(text)?;
                if normalize {
                    normalize_in_place(&mut embedding);
                }
                Ok(embedding)
            })
            .collect()
    }
}

impl<M: EmbeddingModel + ?Sized> EmbeddingModel for &M {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn encode(&self, texts: &[&str], normalize: bool) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).encode(texts, normalize)
    }
}

/// Mock embedding model for testing and offline runs
///
/// Each lowercase word of the input (split on anything that is not
/// alphanumeric) is hashed into a pseudo-random vector; the word vectors are
/// summed and normalized. The embeddings are:
///
/// - **Deterministic**: Same text always produces same embedding
/// - **Normalized**: All vectors have unit length
/// - **Lexically aware**: Relations sharing words score higher than unrelated ones
///
/// A leading `~` contributes its own component so inverse relations do not
/// collapse onto their forward form.
pub struct MockEmbeddingModel {
    dimension: usize,
}

impl MockEmbeddingModel {
    /// Create a new mock embedding model
    ///
    /// # Parameters
    ///
    /// - `dimension`: The embedding dimension (e.g., 384 for bge-small)
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Hash text with a seed to get a deterministic f32 value
    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let hash_value = hasher.finish();

        // Convert hash to float in range [-1, 1]
        let normalized = (hash_value as f64 / u64::MAX as f64) * 2.0 - 1.0;
        normalized as f32
    }

    fn tokens(text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect();
        if text.trim_start().starts_with('~') {
            tokens.push("~".to_string());
        }
        if tokens.is_empty() {
            tokens.push(text.to_string());
        }
        tokens
    }
}

impl EmbeddingModel for MockEmbeddingModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "Empty text cannot be embedded".to_string(),
            ));
        }
        if self.dimension == 0 {
            return Err(EmbeddingError::ModelNotLoaded);
        }

        let mut embedding = vec![0.0f32; self.dimension];
        for token in Self::tokens(text) {
            for (i, value) in embedding.iter_mut().enumerate() {
                *value += Self::hash_with_seed(&token, i as u64);
            }
        }

        normalize_in_place(&mut embedding);
        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Memoizing wrapper around another embedding model
///
/// Relation vocabularies are small and repetitive, so every distinct string
/// is embedded once per wrapper.
pub struct CachedEmbeddingModel<M> {
    inner: M,
    cache: Mutex<HashMap<String, Vec<f32>>>,
}

impl<M: EmbeddingModel> CachedEmbeddingModel<M> {
    /// Wrap `inner` with an empty cache
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached embeddings
    pub fn cached(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }
}

impl<M: EmbeddingModel> EmbeddingModel for CachedEmbeddingModel<M> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| EmbeddingError::InferenceFailed("embedding cache poisoned".to_string()))?;
        if let Some(hit) = cache.get(text) {
            return Ok(hit.clone());
        }
        let embedding = self.inner.embed(text)?;
        cache.insert(text.to_string(), embedding.clone());
        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }
}

/// Scale a vector to unit length; zero vectors are left untouched
pub fn normalize_in_place(embedding: &mut [f32]) {
    let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for value in embedding.iter_mut() {
            *value /= magnitude;
        }
    }
}

/// Dot product of two equal-length vectors
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Calculate cosine similarity between two embedding vectors
///
/// # Returns
///
/// Cosine similarity in range [-1, 1], where:
/// - 1.0 = identical direction
/// - 0.0 = orthogonal
/// - -1.0 = opposite direction
///
/// # Panics
///
/// Panics if vectors have different lengths
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");

    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot(a, b) / (magnitude_a * magnitude_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_embedding_deterministic() {
        let model = MockEmbeddingModel::new(384);

        let embedding1 = model.embed("country of birth").unwrap();
        let embedding2 = model.embed("country of birth").unwrap();

        assert_eq!(embedding1, embedding2, "Same text should produce same embedding");
    }

    #[test]
    fn test_mock_embedding_dimension() {
        let model = MockEmbeddingModel::new(128);

        let embedding = model.embed("test").unwrap();
        assert_eq!(embedding.len(), 128);
        assert_eq!(model.dimension(), 128);
    }

    #[test]
    fn test_mock_embedding_normalized() {
        let model = MockEmbeddingModel::new(384);

        let embedding = model.embed("death place").unwrap();

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 0.0001, "Embedding should be normalized");
    }

    #[test]
    fn test_mock_embedding_case_and_separator_insensitive() {
        let model = MockEmbeddingModel::new(64);

        let a = model.embed("birth_place").unwrap();
        let b = model.embed("Birth Place").unwrap();
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_mock_embedding_inverse_differs() {
        let model = MockEmbeddingModel::new(384);

        let forward = model.embed("capital").unwrap();
        let inverse = model.embed("~capital").unwrap();
        let similarity = cosine_similarity(&forward, &inverse);
        assert!(similarity < 0.99);
        assert!(similarity > 0.3);
    }

    #[test]
    fn test_mock_embedding_empty_text() {
        let model = MockEmbeddingModel::new(384);

        let result = model.embed("  ");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Empty text"));
    }

    #[test]
    fn test_encode_batch_matches_single_calls() {
        let model = MockEmbeddingModel::new(32);

        let batch = model.encode(&["leader", "~leader"], true).unwrap();
        for (text, encoded) in ["leader", "~leader"].iter().zip(&batch) {
            let single = model.embed(text).unwrap();
            assert!((cosine_similarity(encoded, &single) - 1.0).abs() < 0.0001);
        }
    }

    #[test]
    fn test_cached_model_reuses_embeddings() {
        let model = CachedEmbeddingModel::new(MockEmbeddingModel::new(16));

        let first = model.embed("genre").unwrap();
        let second = model.embed("genre").unwrap();
        model.embed("label").unwrap();

        assert_eq!(first, second);
        assert_eq!(model.cached(), 2);
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let vec = vec![1.0, 0.0, 0.0];
        let similarity = cosine_similarity(&vec, &vec);
        assert!((similarity - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let vec1 = vec![1.0, 0.0, 0.0];
        let vec2 = vec![0.0, 1.0, 0.0];
        let similarity = cosine_similarity(&vec1, &vec2);
        assert!(similarity.abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let vec1 = vec![1.0, 0.0, 0.0];
        let vec2 = vec![-1.0, 0.0, 0.0];
        let similarity = cosine_similarity(&vec1, &vec2);
        assert!((similarity + 1.0).abs() < 0.0001);
    }
}
