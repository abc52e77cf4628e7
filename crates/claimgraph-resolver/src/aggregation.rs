//! Score aggregation strategies

use crate::error::ResolverError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the scores of one candidate across groups are combined
///
/// Parsed once at the API boundary; unknown names fail with
/// [`ResolverError::InvalidArgument`].
///
/// ```
/// use claimgraph_resolver::Aggregation;
///
/// let mode: Aggregation = "mean".parse().unwrap();
/// assert_eq!(mode.apply(&[0.2, 0.8]), 0.5);
/// assert!("median".parse::<Aggregation>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Aggregation {
    /// Highest observed score
    #[default]
    Max,
    /// Arithmetic mean of observed scores
    Mean,
    /// Total of observed scores
    Sum,
}

impl Aggregation {
    /// Combine observed scores; an empty slice aggregates to 0.0
    pub fn apply(self, scores: &[f32]) -> f32 {
        if scores.is_empty() {
            return 0.0;
        }
        match self {
            Aggregation::Max => scores.iter().copied().fold(f32::NEG_INFINITY, f32::max),
            Aggregation::Mean => scores.iter().sum::<f32>() / scores.len() as f32,
            Aggregation::Sum => scores.iter().sum(),
        }
    }

    /// Lowercase name of the strategy
    pub fn as_str(self) -> &'static str {
        match self {
            Aggregation::Max => "max",
            Aggregation::Mean => "mean",
            Aggregation::Sum => "sum",
        }
    }
}

impl FromStr for Aggregation {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(Aggregation::Max),
            "mean" => Ok(Aggregation::Mean),
            "sum" => Ok(Aggregation::Sum),
            _ => Err(ResolverError::InvalidArgument(format!(
                "Unsupported aggregation mode: {s:?}"
            ))),
        }
    }
}

impl TryFrom<String> for Aggregation {
    type Error = ResolverError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Aggregation> for String {
    fn from(mode: Aggregation) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
