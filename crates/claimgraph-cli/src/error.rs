//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Triplet parsing error
    #[error(transparent)]
    Parse(#[from] claimgraph_synthesizer::ParseError),

    /// Knowledge graph storage error
    #[error(transparent)]
    Store(#[from] claimgraph_store::StoreError),

    /// Placeholder resolution error
    #[error("Resolution error: {0}")]
    Resolver(#[from] claimgraph_resolver::ResolverError),

    /// LLM backend error
    #[error(transparent)]
    Llm(#[from] claimgraph_llm::LlmError),

    /// Verification error
    #[error("Verification error: {0}")]
    Verifier(#[from] claimgraph_verifier::VerifierError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
