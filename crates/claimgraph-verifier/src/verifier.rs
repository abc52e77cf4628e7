//! Core Verifier implementation

use crate::config::VerifierConfig;
use crate::error::VerifierError;
use crate::prompt::PromptBuilder;
use crate::types::{GraphCheck, VerificationResult};
use claimgraph_domain::traits::{GenerationRequest, LlmProvider};
use claimgraph_domain::{Evidence, Triplet};
use claimgraph_synthesizer::{parse_triplet_list, ParsedTriplet};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// LLM-backed checks around a claim and its pseudo-subgraph
pub struct Verifier<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: VerifierConfig,
}

impl<L> Verifier<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new Verifier; fails when `config` does not validate
    pub fn new(llm_provider: L, config: VerifierConfig) -> Result<Self, VerifierError> {
        config.validate().map_err(VerifierError::Config)?;
        Ok(Self {
            llm_provider: Arc::new(llm_provider),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Decide whether `triplets` support, refute, or leave `claim` open
    pub async fn verify_claim(
        &self,
        claim: &str,
        triplets: &[Triplet],
    ) -> Result<VerificationResult, VerifierError> {
        info!("Verifying claim against {} triplets", triplets.len());
        let request = PromptBuilder::new(&self.config).verification(claim, triplets);
        let answer = self.call_llm(request).await?;
        let result = VerificationResult::parse(&answer)?;
        info!("Verdict: {}", result.verdict);
        Ok(result)
    }

    /// Judge whether synthesized `triplets` follow the claim's evidence
    pub async fn check_pseudo_graph(
        &self,
        claim_data: &str,
        triplets: &[Triplet],
    ) -> Result<GraphCheck, VerifierError> {
        let request = PromptBuilder::new(&self.config).graph_check(claim_data, triplets);
        let answer = self.call_llm(request).await?;
        let check = GraphCheck::parse(&answer)?;
        debug!("Pseudo-graph check: {}", check);
        Ok(check)
    }

    /// Ask the model for a fresh triplet list and parse it
    ///
    /// Malformed records in the answer are skipped by the parser; an answer
    /// with no usable triplet at all is an [`VerifierError::InvalidResponse`].
    pub async fn relabel(
        &self,
        claim_data: &str,
        entities: &[String],
        evidence: &Evidence,
    ) -> Result<Vec<ParsedTriplet>, VerifierError> {
        let request = PromptBuilder::new(&self.config).relabel(claim_data, entities, evidence)?;
        let answer = self.call_llm(request).await?;

        let triplets = parse_triplet_list(&answer);
        if triplets.is_empty() {
            warn!("Relabelling answer held no triplets");
            return Err(VerifierError::InvalidResponse(
                "no triplet in relabelling answer".to_string(),
            ));
        }
        info!("Relabelled into {} triplets", triplets.len());
        Ok(triplets)
    }

    /// Call the LLM provider with timeout
    async fn call_llm(&self, request: GenerationRequest) -> Result<String, VerifierError> {
        debug!("Prompt length: {} chars", request.prompt.len());
        let llm = Arc::clone(&self.llm_provider);

        // Call in a blocking context since LlmProvider is not async
        let task = tokio::task::spawn_blocking(move || {
            llm.generate(&request)
                .map_err(|e| VerifierError::Llm(e.to_string()))
        });

        let answer = timeout(self.config.timeout(), task)
            .await
            .map_err(|_| VerifierError::Timeout)?
            .map_err(|e| VerifierError::Llm(format!("Task join error: {}", e)))??;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(VerifierError::EmptyResponse);
        }
        debug!("LLM response length: {} chars", answer.len());
        Ok(answer.to_string())
    }
}
