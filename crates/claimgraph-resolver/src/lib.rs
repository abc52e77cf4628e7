//! Claimgraph Resolver
//!
//! Ranks knowledge-graph entities as substitutes for the placeholder nodes of
//! a synthesized pseudo-subgraph.
//!
//! # Overview
//!
//! A placeholder's explicit neighbors and the pseudo-relations that join
//! them form its context. Candidates are the tails of KG edges leaving those
//! neighbors through relations similar to the pseudo-relations; each
//! candidate is scored by how well the KG edges reaching it match, then
//! aggregated across lookups and truncated to the best `k1`.
//!
//! # Architecture
//!
//! ```text
//! triplets → placeholder_contexts → CandidateRetriever → rank → Resolution
//!                                        │                 │
//!                              KnowledgeGraphStore   RelationSimilarity
//! ```
//!
//! Both collaborators are traits from `claimgraph-domain`. Their errors are
//! passed through unchanged as [`ResolverError::Upstream`].

#![warn(missing_docs)]

mod aggregation;
mod config;
mod context;
mod error;
mod resolver;
mod retriever;
mod scorer;

#[cfg(test)]
mod testing;

pub use aggregation::Aggregation;
pub use config::ResolverConfig;
pub use context::{placeholder_contexts, ContextEdge, NodeContext};
pub use error::{BoxError, ResolverError};
pub use resolver::{substitute, Resolution, Resolver};
pub use retriever::CandidateRetriever;
pub use scorer::{rank, score};
