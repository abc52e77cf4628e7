//! Error types for the Synthesizer

use thiserror::Error;

/// Errors that can occur while parsing textual triplets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The record did not split into exactly three `||`-separated parts
    #[error("Expected 3 parts separated by '||', got {count}: {input:?}")]
    Format {
        /// Number of segments actually found
        count: usize,
        /// The offending record
        input: String,
    },
}
