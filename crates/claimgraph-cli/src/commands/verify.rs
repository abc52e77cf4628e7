//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::commands::resolve::{build_resolver, GraphSource, Similarity};
use crate::commands::{find_record, load_dataset};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use claimgraph_domain::traits::{KnowledgeGraphStore, LlmProvider};
use claimgraph_domain::{ClaimRecord, Triplet};
use claimgraph_llm::OllamaProvider;
use claimgraph_resolver::{substitute, BoxError, Resolver};
use claimgraph_synthesizer::{augment, ParsedTriplet};
use claimgraph_verifier::{GraphCheck, VerificationResult, Verifier};
use serde::Serialize;
use std::fmt::Display;
use tracing::{info, warn};

/// Everything `verify` reports for one claim
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// Claim id
    pub id: String,
    /// Claim text sent to the model
    pub claim: String,
    /// Pseudo-subgraph check, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_check: Option<GraphCheck>,
    /// Evidence triplets sent to the model
    pub evidence: Vec<Triplet>,
    /// Model verdict
    pub result: VerificationResult,
}

/// Pipeline switches for one verification
pub struct VerifyOptions<'a, G> {
    /// Claim text overriding the record's own
    pub claim: Option<String>,
    /// Resolve placeholders before asking for a verdict
    pub resolver: Option<&'a Resolver<G, Similarity>>,
    /// Check (and possibly relabel) the pseudo-subgraph first
    pub check: bool,
    /// Underscore handling when synthesizing
    pub remove_underscore: bool,
}

/// Execute the verify command.
pub async fn execute_verify(args: VerifyArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let record = find_record(load_dataset(&args.dataset)?, &args.id)?;

    let model = args.model.as_deref().unwrap_or(&config.ollama.model);
    let llm = OllamaProvider::new(&config.ollama.endpoint, model)?.with_max_retries(config.ollama.max_retries);
    info!("Verifying claim {} with {}", args.id, llm.model());
    let verifier = Verifier::new(llm, config.verifier.clone())?;

    let resolver = match &args.graph {
        Some(path) => Some(build_resolver(
            GraphSource::open(path)?,
            config.resolver.clone(),
            config.embedding.dimension,
        )?),
        None => None,
    };

    let options = VerifyOptions {
        claim: args.claim,
        resolver: resolver.as_ref(),
        check: args.check,
        remove_underscore: config.settings.remove_underscore,
    };
    let report = verify_record(&verifier, args.id, record, options).await?;

    if report.graph_check == Some(GraphCheck::DataProblem) {
        println!("{}", formatter.warning("Claim data was judged malformed"));
    }
    println!("{}", formatter.format_verification(&report)?);
    Ok(())
}

/// Run the verification pipeline on one record.
///
/// The pseudo-subgraph is synthesized when missing. With `check`, an
/// `INCORRECT` judgement replaces it by the model's relabelled triplets.
/// With a resolver, placeholders are substituted by their ranked entities.
pub async fn verify_record<L, G>(
    verifier: &Verifier<L>,
    id: String,
    record: ClaimRecord,
    options: VerifyOptions<'_, G>,
) -> Result<VerificationReport>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
    G: KnowledgeGraphStore,
    G::Error: Into<BoxError>,
{
    let record = if record.triplet.is_some() {
        record
    } else {
        augment(record, options.remove_underscore)
    };

    let claim = match options.claim {
        Some(text) => text,
        None => record
            .claim_text()
            .map(str::to_string)
            .ok_or_else(|| {
                CliError::InvalidInput(format!("Claim {} has no claim text; pass it as an argument", id))
            })?,
    };

    let mut evidence = record.triplet.clone().unwrap_or_default();
    let mut graph_check = None;

    if options.check {
        let claim_data = serde_json::to_string(&record)?;
        let check = verifier.check_pseudo_graph(&claim_data, &evidence).await?;
        match check {
            GraphCheck::Incorrect => {
                let relabelled = verifier
                    .relabel(&claim_data, &record.entity_set, &record.evidence)
                    .await?;
                evidence = relabelled.into_iter().map(ParsedTriplet::into_triplet).collect();
                info!("Claim {}: pseudo-subgraph relabelled into {} triplets", id, evidence.len());
            }
            GraphCheck::DataProblem => warn!("Claim {}: data problem reported", id),
            GraphCheck::Correct => {}
        }
        graph_check = Some(check);
    }

    if let Some(resolver) = options.resolver {
        let resolutions = resolver.resolve(&evidence)?;
        evidence = substitute(&evidence, &resolutions);
    }

    let result = verifier.verify_claim(&claim, &evidence).await?;
    Ok(VerificationReport {
        id,
        claim,
        graph_check,
        evidence,
        result,
    })
}
