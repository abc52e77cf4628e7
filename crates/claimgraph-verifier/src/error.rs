//! Error types for the Verifier

use thiserror::Error;

/// Errors that can occur during verification
#[derive(Error, Debug)]
pub enum VerifierError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// The LLM did not answer within the configured timeout
    #[error("Verification timeout")]
    Timeout,

    /// The LLM returned nothing
    #[error("Empty response from LLM")]
    EmptyResponse,

    /// The answer carried none of the expected labels
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Claim data could not be rendered for the prompt
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for VerifierError {
    fn from(e: serde_json::Error) -> Self {
        VerifierError::Json(e.to_string())
    }
}
