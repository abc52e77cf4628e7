//! Parse textual entity-relation-entity records into triplets

use crate::error::ParseError;
use claimgraph_domain::{RelationToken, Triplet};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Separator between the three parts of a record
const SEPARATOR: &str = "||";

static ENTITY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<e>\s*(.*?)\s*</e>").expect("entity tag pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

static INVERSE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^~\s*").expect("inverse marker pattern"));

/// A parsed record: `relation` may still carry the `~` marker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedTriplet {
    /// Left-hand entity as written
    pub subject: String,

    /// Normalized relation, `~name` when inverse
    pub relation: String,

    /// Right-hand entity as written
    pub object: String,
}

impl ParsedTriplet {
    /// Decode the relation into a [`RelationToken`]
    pub fn relation_token(&self) -> RelationToken {
        RelationToken::parse(&self.relation)
    }

    /// Resolve the inverse marker into head/tail order
    ///
    /// `A || ~r || B` becomes `(B, r, A)`.
    pub fn into_triplet(self) -> Triplet {
        let token = self.relation_token();
        if token.is_inverse() {
            Triplet::new(self.object, token.name, self.subject)
        } else {
            Triplet::new(self.subject, token.name, self.object)
        }
    }
}

/// Parse a single `<e>A</e> || relation || <e>B</e>` record
///
/// Entities may be tagged (`<e>...</e>`, any case) or bare tokens such as
/// `unknown_0`. Whitespace inside the relation collapses to single spaces
/// and a leading `~` is attached to the relation name.
///
/// # Examples
///
/// ```
/// use claimgraph_synthesizer::parse_triplet;
///
/// let parsed = parse_triplet("unknown_0 || ~  birth   place || <e>Vedat Tek</e>").unwrap();
/// assert_eq!(parsed.subject, "unknown_0");
/// assert_eq!(parsed.relation, "~birth place");
/// assert_eq!(parsed.object, "Vedat Tek");
/// ```
pub fn parse_triplet(record: &str) -> Result<ParsedTriplet, ParseError> {
    let parts: Vec<&str> = record.split(SEPARATOR).map(str::trim).collect();
    if parts.len() != 3 {
        return Err(ParseError::Format {
            count: parts.len(),
            input: record.to_string(),
        });
    }

    Ok(ParsedTriplet {
        subject: extract_entity(parts[0]),
        relation: normalize_relation(parts[1]),
        object: extract_entity(parts[2]),
    })
}

/// Parse every record found in a free-form LLM answer
///
/// Records are separated by `;` or newlines. A leading label such as
/// `Correct triplet:` is dropped. Fragments without a separator are treated
/// as prose and ignored; malformed records are skipped with a warning.
pub fn parse_triplet_list(text: &str) -> Vec<ParsedTriplet> {
    let mut triplets = Vec::new();

    for (idx, fragment) in text.split([';', '\n']).enumerate() {
        let fragment = strip_label(fragment.trim());
        if fragment.is_empty() {
            continue;
        }
        if !fragment.contains(SEPARATOR) {
            debug!("Ignoring prose fragment {}: {:?}", idx, fragment);
            continue;
        }
        match parse_triplet(fragment) {
            Ok(parsed) => triplets.push(parsed),
            Err(e) => warn!("Failed to parse triplet {}: {}", idx, e),
        }
    }

    triplets
}

/// Render a triplet in the tagged record format
pub fn format_triplet(triplet: &Triplet) -> String {
    format!(
        "<e>{}</e> {} {} {} <e>{}</e>",
        triplet.head, SEPARATOR, triplet.relation, SEPARATOR, triplet.tail
    )
}

/// Render a whole pseudo-subgraph, one record per line
pub fn format_graph(triplets: &[Triplet]) -> String {
    triplets
        .iter()
        .map(format_triplet)
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_entity(part: &str) -> String {
    match ENTITY_TAG.captures(part).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().to_string(),
        None => part.trim().to_string(),
    }
}

fn normalize_relation(part: &str) -> String {
    let collapsed = WHITESPACE.replace_all(part, " ");
    INVERSE_GAP.replace(collapsed.trim(), "~").into_owned()
}

/// Drop a `Label:` prefix that precedes the first record
fn strip_label(fragment: &str) -> &str {
    match fragment.split_once(':') {
        Some((label, rest)) if !label.contains(SEPARATOR) && !label.contains('<') => rest.trim(),
        _ => fragment,
    }
}
