//! Labels returned by the verification tasks

use crate::error::VerifierError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static VERDICT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(not[\s_-]*enough[\s_-]*info(?:rmation)?|supported|refuted)\b")
        .expect("verdict pattern")
});

static CHECK_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(data[\s_-]*problem|incorrect|correct)\b").expect("graph check pattern")
});

/// Fact-checking outcome for a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// The evidence supports the claim
    Supported,
    /// The evidence contradicts the claim
    Refuted,
    /// The evidence does not decide the claim
    NotEnoughInfo,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Supported => "Supported",
            Verdict::Refuted => "Refuted",
            Verdict::NotEnoughInfo => "NotEnoughInfo",
        };
        f.write_str(label)
    }
}

/// A verdict with the model's one-sentence justification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Decided label
    pub verdict: Verdict,

    /// Text following the label, possibly empty
    pub explanation: String,

    /// Full model answer
    pub raw: String,
}

impl VerificationResult {
    /// Parse a model answer; the first recognized label wins
    ///
    /// ```
    /// use claimgraph_verifier::{Verdict, VerificationResult};
    ///
    /// let result = VerificationResult::parse("Refuted. Hue is not the capital.").unwrap();
    /// assert_eq!(result.verdict, Verdict::Refuted);
    /// assert_eq!(result.explanation, "Hue is not the capital.");
    /// ```
    pub fn parse(answer: &str) -> Result<Self, VerifierError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(VerifierError::EmptyResponse);
        }
        let found = VERDICT_LABEL
            .find(answer)
            .ok_or_else(|| VerifierError::InvalidResponse(truncate(answer)))?;

        let label = found.as_str().to_ascii_lowercase();
        let verdict = if label.starts_with("supported") {
            Verdict::Supported
        } else if label.starts_with("refuted") {
            Verdict::Refuted
        } else {
            Verdict::NotEnoughInfo
        };

        let explanation = answer[found.end()..]
            .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ':' | ',' | '-' | ']' | '*'))
            .trim()
            .to_string();

        Ok(Self {
            verdict,
            explanation,
            raw: answer.to_string(),
        })
    }
}

/// Whether synthesized triplets match the claim's evidence structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphCheck {
    /// Triplets match the evidence
    Correct,
    /// Triplets disagree with the evidence
    Incorrect,
    /// The claim data itself is malformed or contradictory
    DataProblem,
}

impl GraphCheck {
    /// Parse a model answer; the first recognized label wins
    pub fn parse(answer: &str) -> Result<Self, VerifierError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(VerifierError::EmptyResponse);
        }
        let found = CHECK_LABEL
            .find(answer)
            .ok_or_else(|| VerifierError::InvalidResponse(truncate(answer)))?;

        let label = found.as_str().to_ascii_lowercase();
        Ok(if label.starts_with("data") {
            GraphCheck::DataProblem
        } else if label == "incorrect" {
            GraphCheck::Incorrect
        } else {
            GraphCheck::Correct
        })
    }
}

impl fmt::Display for GraphCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GraphCheck::Correct => "CORRECT",
            GraphCheck::Incorrect => "INCORRECT",
            GraphCheck::DataProblem => "DATA_PROBLEM",
        };
        f.write_str(label)
    }
}

fn truncate(answer: &str) -> String {
    const LIMIT: usize = 120;
    match answer.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &answer[..cut]),
        None => answer.to_string(),
    }
}
