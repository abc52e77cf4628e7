//! Claimgraph Verifier
//!
//! LLM-backed checks around a claim's pseudo-subgraph.
//!
//! # Overview
//!
//! Three tasks share one provider and one configuration:
//!
//! - **Verification**: decide `Supported`, `Refuted` or `NotEnoughInfo` for a
//!   claim given an evidence graph
//! - **Pseudo-graph check**: judge whether synthesized triplets follow the
//!   claim's evidence structure
//! - **Relabelling**: ask for a fresh `<e>H</e> || r || <e>T</e>` list when
//!   the synthesized one is judged wrong
//!
//! # Architecture
//!
//! ```text
//! claim + triplets → PromptBuilder → LLM (spawn_blocking, timeout) → label parser
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use claimgraph_domain::Triplet;
//! use claimgraph_llm::MockProvider;
//! use claimgraph_verifier::{Verdict, Verifier, VerifierConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let verifier = Verifier::new(MockProvider::new("Supported."), VerifierConfig::default())?;
//!
//! let graph = vec![Triplet::new("Hue", "country", "Vietnam")];
//! let result = verifier.verify_claim("Hue is in Vietnam.", &graph).await?;
//! assert_eq!(result.verdict, Verdict::Supported);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod prompt;
mod types;
mod verifier;

pub use config::VerifierConfig;
pub use error::VerifierError;
pub use prompt::PromptBuilder;
pub use types::{GraphCheck, Verdict, VerificationResult};
pub use verifier::Verifier;
