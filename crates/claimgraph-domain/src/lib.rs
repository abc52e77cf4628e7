//! Claimgraph Domain Layer
//!
//! This crate contains the core vocabulary shared by every other crate in the
//! workspace: claim records, relation tokens, triplets, and the trait
//! interfaces for the external collaborators (knowledge graph, relation
//! similarity, text generation). It depends only on `serde` and `serde_json`,
//! so that claim records can cross the boundary to the extraction pipeline
//! unchanged.
//!
//! ## Key Concepts
//!
//! - **Claim record**: an explicit entity set plus an evidence map of relation paths
//! - **Relation token**: a relation name, optionally inverse (`~r`)
//! - **Triplet**: a directed `(head, relation, tail)` edge of a pseudo-subgraph
//! - **Placeholder**: an `unknown_<i>` node standing in for an unnamed entity
//!
//! ## Architecture
//!
//! - Pure data and logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod relation;
pub mod traits;
pub mod triplet;

// Re-exports for convenience
pub use claim::{ClaimRecord, Evidence, RelationGroup};
pub use relation::{Direction, RelationToken};
pub use triplet::{is_placeholder, placeholder_id, Edge, Triplet, PLACEHOLDER_PREFIX};
