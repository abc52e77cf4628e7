//! Claimgraph LLM backends
//!
//! Implementations of `claimgraph_domain::traits::LlmProvider` used by the
//! verifier. Each call carries a [`GenerationRequest`] with an optional
//! system instruction, a temperature and a token budget.
//!
//! - [`MockProvider`]: scripted replies, request recording, error injection
//! - [`OllamaProvider`]: local Ollama server over HTTP
//!
//! # Examples
//!
//! ```
//! use claimgraph_domain::traits::{GenerationRequest, LlmProvider};
//! use claimgraph_llm::MockProvider;
//!
//! let provider = MockProvider::new("Supported");
//! let result = provider.generate(&GenerationRequest::new("test prompt")).unwrap();
//! assert_eq!(result, "Supported");
//! ```

#![warn(missing_docs)]

pub mod ollama;

use claimgraph_domain::traits::{GenerationRequest, LlmProvider as LlmProviderTrait};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Failures of a text-generation backend
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transport failure or unexpected HTTP status
    #[error("Communication error: {0}")]
    Communication(String),

    /// Body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP 429 on every attempt
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model is not installed on the server
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Client setup or injected failure
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail,
}

/// Scripted provider for tests
///
/// Replies are looked up by exact prompt; unscripted prompts get the default
/// reply. Clones share scripts and the request log.
///
/// # Examples
///
/// ```
/// use claimgraph_domain::traits::{GenerationRequest, LlmProvider};
/// use claimgraph_llm::MockProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate(&GenerationRequest::new("any prompt")).unwrap(), "Fixed response");
///
/// // Multiple responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_response("prompt2", "response2");
/// assert_eq!(provider.generate(&GenerationRequest::new("prompt1")).unwrap(), "response1");
/// assert_eq!(provider.generate(&GenerationRequest::new("prompt2")).unwrap(), "response2");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Scripted>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockProvider {
    /// Provider answering `response` to every unscripted prompt
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script the reply for `prompt`
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Scripted::Reply(response.into()));
    }

    /// Make `prompt` fail with [`LlmError::Other`]
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Scripted::Fail);
    }

    /// Requests received so far
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Forget recorded requests
    pub fn reset_call_count(&self) {
        lock(&self.requests).clear();
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<GenerationRequest> {
        lock(&self.requests).last().cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, request: &GenerationRequest) -> Result<String, Self::Error> {
        lock(&self.requests).push(request.clone());

        match lock(&self.responses).get(&request.prompt) {
            Some(Scripted::Reply(response)) => Ok(response.clone()),
            Some(Scripted::Fail) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}
