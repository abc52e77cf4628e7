//! LLM prompt engineering for claim verification

use crate::config::VerifierConfig;
use claimgraph_domain::traits::GenerationRequest;
use claimgraph_domain::{Evidence, Triplet};
use claimgraph_synthesizer::format_graph;

/// Builds the requests for the three verification tasks
pub struct PromptBuilder<'a> {
    config: &'a VerifierConfig,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder using `config` for sampling settings
    pub fn new(config: &'a VerifierConfig) -> Self {
        Self { config }
    }

    /// Ask for a verdict on `claim` given an evidence graph
    pub fn verification(&self, claim: &str, triplets: &[Triplet]) -> GenerationRequest {
        let prompt = format!(
            "Claim: {}\n\nEvidence:\n{}\n\n{}",
            claim.trim(),
            format_graph(triplets),
            VERDICT_QUESTION
        );
        self.request(prompt, VERDICT_SYSTEM, self.config.verdict_max_tokens)
    }

    /// Ask whether synthesized triplets match the claim data
    pub fn graph_check(&self, claim_data: &str, triplets: &[Triplet]) -> GenerationRequest {
        let prompt = format!(
            "Given the following JSON claim data:\n{}\n\n\
             And the following triplets in the format:\n<e>HEAD</e> || RELATION || <e>TAIL</e>\n{}\n\n{}",
            claim_data.trim(),
            format_graph(triplets),
            CHECK_RULES
        );
        self.request(prompt, CHECK_SYSTEM, self.config.check_max_tokens)
    }

    /// Ask for a fresh triplet representation of the claim
    pub fn relabel(
        &self,
        claim_data: &str,
        entities: &[String],
        evidence: &Evidence,
    ) -> Result<GenerationRequest, serde_json::Error> {
        let prompt = format!(
            "Given the following JSON claim data:\n{}\n\n\
             Given the following entities as an array:\n{}\n\n\
             Given the following evidence, each key-value is a pair of entity and its relation paths:\n{}\n\n{}",
            claim_data.trim(),
            serde_json::to_string(entities)?,
            serde_json::to_string(evidence)?,
            RELABEL_INSTRUCTIONS
        );
        Ok(self.request(prompt, RELABEL_SYSTEM, self.config.relabel_max_tokens))
    }

    fn request(&self, prompt: String, system: &str, max_tokens: u32) -> GenerationRequest {
        GenerationRequest::new(prompt)
            .with_system(system)
            .with_temperature(self.config.temperature)
            .with_max_tokens(max_tokens)
    }
}

const VERDICT_SYSTEM: &str = "You are a fact checker. You receive a claim and evidence as a graph \
of triplets in text format. Decide whether the evidence supports the claim, refutes it, or does \
not contain enough information to decide. A relation prefixed with ~ runs in the reverse \
direction. Answer with one of [Supported, Refuted, NotEnoughInfo] and give a short explanation \
in one sentence.";

const VERDICT_QUESTION: &str = "Question: Is the claim supported by the evidence?
Please answer with one of [Supported, Refuted, NotEnoughInfo]
and give a short explanation in one sentence.";

const CHECK_SYSTEM: &str = "You are a pseudo-graph checker. Evaluate whether the generated \
triplets match the Evidence structure. Output only one token from [CORRECT, INCORRECT, DATA_PROBLEM].";

const CHECK_RULES: &str = r#"Rules:
1. 'Entity_set' lists entities explicitly mentioned in the claim.
2. 'Evidence' maps each entity to one or more relation paths.
   - A relation 'r' means HEAD --r--> TAIL.
   - '~r' means TAIL --r--> HEAD.
3. Multi-hop paths must be broken into correct hop-by-hop triplets.
4. Hidden or implicit entities must be represented as unknown_i.
5. Triplets must match the structure implied by Evidence.
6. Only answer the correctness of the triplets, not the claim.

Your task:
Determine whether the triplets are consistent with the given Evidence.
Answer strictly with one of:
- CORRECT: triplets match Evidence structure
- INCORRECT: triplets disagree with Evidence
- DATA_PROBLEM: claim_data itself is malformed or contradictory"#;

const RELABEL_SYSTEM: &str = "You are a tool that generates the triplet representation of a \
claim from its data, entities and evidence, balancing claim data and evidence. A relation \
prefixed with ~ is a reverse relation, not a negation.";

const RELABEL_INSTRUCTIONS: &str = r#"Find the correct triplet representation of the claim in the format:
<e>HEAD</e> || RELATION || <e>TAIL</e>

Separate triplets with ';'. Skip evidence that does not fit the claim. Represent implicit
entities as unknown_i, where i is an integer starting from 0.

For example:
Claim data: "The author of 'Romeo and Juliet' is from a country that is in Europe."
Entities: ["Romeo and Juliet", "Europe"]
Evidence: {"Romeo and Juliet": [["written_by"]], "Europe": [["continent_of"]]}

Correct triplets: <e>Romeo and Juliet</e> || written_by || <e>unknown_0</e>; <e>unknown_0</e> || continent_of || <e>Europe</e>"#;
