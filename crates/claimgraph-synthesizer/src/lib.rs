//! Claimgraph Synthesizer
//!
//! Turns the LLM-extracted description of a claim into an explicit
//! pseudo-subgraph.
//!
//! # Overview
//!
//! Two textual shapes reach this crate:
//!
//! - **Claim records** (`Entity_set` + `Evidence`), expanded into triplets by
//!   [`synthesize`], handling inverse relations and implicit nodes
//! - **Triplet strings** (`<e>A</e> || rel || <e>B</e>`), parsed by
//!   [`parse_triplet`] and [`parse_triplet_list`]
//!
//! # Architecture
//!
//! ```text
//! ClaimRecord → synthesize → Vec<Triplet> (with unknown_i placeholders) → resolver
//! ```
//!
//! # Example Usage
//!
//! ```
//! use claimgraph_domain::{Evidence, Triplet};
//! use claimgraph_synthesizer::synthesize;
//!
//! let evidence: Evidence = [("Hue", vec![vec!["~capital".to_string()]])]
//!     .into_iter()
//!     .collect();
//! let triplets = synthesize(&["Hue".to_string()], &evidence, true);
//!
//! assert_eq!(triplets, vec![Triplet::new("unknown_0", "capital", "Hue")]);
//! ```

#![warn(missing_docs)]

mod dataset;
mod error;
mod parser;
mod placeholder;
mod synthesis;

pub use dataset::{process_dataset, EntityAccumulator};
pub use error::ParseError;
pub use parser::{format_graph, format_triplet, parse_triplet, parse_triplet_list, ParsedTriplet};
pub use placeholder::PlaceholderAllocator;
pub use synthesis::{augment, normalize_entity, synthesize, synthesize_record};
