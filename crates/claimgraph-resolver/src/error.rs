//! Error types for the Resolver

use thiserror::Error;

/// Boxed error from a knowledge graph or similarity backend
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during candidate resolution
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Caller passed an unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Knowledge graph or similarity failure, passed through as-is
    #[error(transparent)]
    Upstream(BoxError),
}

impl ResolverError {
    pub(crate) fn upstream<E: Into<BoxError>>(error: E) -> Self {
        ResolverError::Upstream(error.into())
    }
}
