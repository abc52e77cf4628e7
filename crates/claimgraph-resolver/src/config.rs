//! Configuration for the Resolver

use crate::aggregation::Aggregation;
use serde::{Deserialize, Serialize};

/// Configuration for the Resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Relations kept per context pair when gathering candidates
    pub top_k_relations: usize,

    /// Ranked candidates kept per unknown node (`k1`)
    pub top_k_candidates: usize,

    /// Average matching-edge similarities instead of summing them
    pub normalize: bool,

    /// How a candidate's scores across groups are combined
    pub aggregation: Aggregation,
}

impl ResolverConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.top_k_relations == 0 {
            return Err("top_k_relations must be greater than 0".to_string());
        }
        if self.top_k_candidates == 0 {
            return Err("top_k_candidates must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ResolverConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            top_k_relations: 5,
            top_k_candidates: 10,
            normalize: true,
            aggregation: Aggregation::Max,
        }
    }
}

impl ResolverConfig {
    /// Strict preset: few relations, few candidates, best single match wins
    pub fn strict() -> Self {
        Self {
            top_k_relations: 2,
            top_k_candidates: 3,
            normalize: true,
            aggregation: Aggregation::Max,
        }
    }

    /// Broad preset: wide relation net, evidence accumulates across groups
    pub fn broad() -> Self {
        Self {
            top_k_relations: 10,
            top_k_candidates: 25,
            normalize: false,
            aggregation: Aggregation::Sum,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(ResolverConfig::default().validate().is_ok());
        assert!(ResolverConfig::strict().validate().is_ok());
        assert!(ResolverConfig::broad().validate().is_ok());
    }

    #[test]
    fn test_zero_top_k_is_invalid() {
        let mut config = ResolverConfig::default();
        config.top_k_candidates = 0;
        assert!(config.validate().is_err());

        let mut config = ResolverConfig::default();
        config.top_k_relations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ResolverConfig::broad();
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("aggregation = \"sum\""));

        let parsed = ResolverConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ResolverConfig::from_toml("aggregation = \"mean\"").unwrap();
        assert_eq!(parsed.aggregation, Aggregation::Mean);
        assert_eq!(parsed.top_k_candidates, 10);
    }

    #[test]
    fn test_unknown_aggregation_rejected() {
        let result = ResolverConfig::from_toml("aggregation = \"median\"");
        assert!(result.unwrap_err().contains("median"));
    }
}
