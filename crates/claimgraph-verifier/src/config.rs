//! Configuration for the Verifier

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Verifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Maximum time for a single LLM call (seconds)
    pub timeout_secs: u64,

    /// Sampling temperature for every task
    pub temperature: f32,

    /// Token budget for claim verdicts
    pub verdict_max_tokens: u32,

    /// Token budget for pseudo-graph checks (a single label)
    pub check_max_tokens: u32,

    /// Token budget for relabelled triplet lists
    pub relabel_max_tokens: u32,
}

impl VerifierConfig {
    /// Get the timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        if self.verdict_max_tokens == 0 || self.check_max_tokens == 0 || self.relabel_max_tokens == 0 {
            return Err("token budgets must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for VerifierConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            temperature: 0.3,
            verdict_max_tokens: 256,
            check_max_tokens: 32,
            relabel_max_tokens: 256,
        }
    }
}

impl VerifierConfig {
    /// Aggressive preset: short timeout, deterministic sampling, tight budgets
    pub fn aggressive() -> Self {
        Self {
            timeout_secs: 20,
            temperature: 0.0,
            verdict_max_tokens: 96,
            check_max_tokens: 8,
            relabel_max_tokens: 128,
        }
    }

    /// Lenient preset: long timeout and generous budgets for slow local models
    pub fn lenient() -> Self {
        Self {
            timeout_secs: 300,
            temperature: 0.3,
            verdict_max_tokens: 512,
            check_max_tokens: 64,
            relabel_max_tokens: 1024,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
