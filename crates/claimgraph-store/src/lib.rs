//! Claimgraph Storage Layer
//!
//! Knowledge-graph backends and relation similarity for candidate resolution.
//!
//! # Architecture
//!
//! - [`MemoryGraph`]: adjacency map for loaded files and tests
//! - [`SqliteGraph`]: persistent edge table for large graphs
//! - [`EmbeddingSimilarity`]: relation similarity over an [`EmbeddingModel`]
//! - [`loader`]: TSV and JSON adjacency readers
//! - [`EntityTrie`]: prefix index over entity names
//!
//! Both graphs implement [`KnowledgeGraphStore`]; the similarity service
//! implements [`RelationSimilarity`].
//!
//! # Examples
//!
//! ```
//! use claimgraph_domain::traits::KnowledgeGraphStore;
//! use claimgraph_domain::Triplet;
//! use claimgraph_store::SqliteGraph;
//!
//! let mut graph = SqliteGraph::in_memory().unwrap();
//! graph.insert_triple(&Triplet::new("Hue", "country", "Vietnam")).unwrap();
//! assert_eq!(graph.out_edges("Hue").unwrap().len(), 1);
//! ```
//!
//! [`KnowledgeGraphStore`]: claimgraph_domain::traits::KnowledgeGraphStore
//! [`RelationSimilarity`]: claimgraph_domain::traits::RelationSimilarity

#![warn(missing_docs)]

pub mod embedding;
pub mod loader;
mod memory;
mod similarity;
mod sqlite;
mod trie;

use thiserror::Error;

pub use embedding::{CachedEmbeddingModel, EmbeddingError, EmbeddingModel, MockEmbeddingModel};
pub use loader::load_triplets_file;
pub use memory::{GraphStats, MemoryGraph};
pub use similarity::{EmbeddingSimilarity, SimilarityError};
pub use sqlite::SqliteGraph;
pub use trie::EntityTrie;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Reading a graph file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON graph file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
