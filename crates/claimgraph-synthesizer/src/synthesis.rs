//! Pseudo-subgraph synthesis from a claim's entity set and evidence

use crate::placeholder::PlaceholderAllocator;
use claimgraph_domain::{is_placeholder, ClaimRecord, Evidence, RelationToken, Triplet};
use std::collections::HashSet;
use tracing::debug;

/// Normalize an entity name for output
///
/// Underscores become spaces when `remove_underscore` is set. Placeholder
/// identifiers are never altered.
pub fn normalize_entity(name: &str, remove_underscore: bool) -> String {
    if remove_underscore && !is_placeholder(name) {
        name.replace('_', " ")
    } else {
        name.to_string()
    }
}

/// Expand a claim's entity set and evidence into triplets
///
/// With exactly one explicit entity every relation hangs between that entity
/// and a single placeholder `unknown_0`, in evidence order and without
/// deduplication. Otherwise implicit evidence keys get placeholders, every
/// relation is materialized against every other node, and the result is
/// deduplicated keeping first occurrences.
pub fn synthesize(entity_set: &[String], evidence: &Evidence, remove_underscore: bool) -> Vec<Triplet> {
    let explicit = distinct(entity_set);

    let triplets = match explicit.as_slice() {
        [head] => single_entity(head, evidence, remove_underscore),
        _ => multi_entity(&explicit, evidence, remove_underscore),
    };

    debug!(
        "Synthesized {} triplets from {} explicit entities and {} evidence keys",
        triplets.len(),
        explicit.len(),
        evidence.len()
    );

    triplets
}

/// Synthesize triplets for `record` and store them in its `triplet` field
pub fn synthesize_record(record: &mut ClaimRecord, remove_underscore: bool) -> &[Triplet] {
    let triplets = synthesize(&record.entity_set, &record.evidence, remove_underscore);
    record.triplet.insert(triplets).as_slice()
}

/// Return a copy of `record` augmented with its triplets
pub fn augment(mut record: ClaimRecord, remove_underscore: bool) -> ClaimRecord {
    synthesize_record(&mut record, remove_underscore);
    record
}

fn single_entity(head: &str, evidence: &Evidence, remove_underscore: bool) -> Vec<Triplet> {
    let mut placeholders = PlaceholderAllocator::new();
    let head = normalize_entity(head, remove_underscore);
    let tail = placeholders.fresh();

    let mut triplets = Vec::new();
    for (_, groups) in evidence.iter() {
        for raw in groups.iter().flatten() {
            let token = RelationToken::parse(raw);
            if token.is_inverse() {
                triplets.push(Triplet::new(tail.clone(), token.name, head.clone()));
            } else {
                triplets.push(Triplet::new(head.clone(), token.name, tail.clone()));
            }
        }
    }
    triplets
}

fn multi_entity(explicit: &[&str], evidence: &Evidence, remove_underscore: bool) -> Vec<Triplet> {
    if explicit.is_empty() {
        debug!("Empty entity set; every evidence key becomes a placeholder");
    }

    let mut placeholders = PlaceholderAllocator::new();
    for key in evidence.keys() {
        if !explicit.contains(&key) {
            placeholders.resolve(key);
        }
    }

    let nodes: Vec<String> = explicit
        .iter()
        .map(|e| normalize_entity(e, remove_underscore))
        .chain(placeholders.named().map(str::to_string))
        .collect();

    let mut triplets = Vec::new();
    for (key, groups) in evidence.iter() {
        let head = match placeholders.get(key) {
            Some(id) => id.to_string(),
            None => normalize_entity(key, remove_underscore),
        };
        let tails: Vec<&String> = nodes.iter().filter(|node| **node != head).collect();

        for raw in groups.iter().flatten() {
            let token = RelationToken::parse(raw);
            for tail in &tails {
                if token.is_inverse() {
                    triplets.push(Triplet::new(tail.as_str(), token.name.as_str(), head.as_str()));
                } else {
                    triplets.push(Triplet::new(head.as_str(), token.name.as_str(), tail.as_str()));
                }
            }
        }
    }

    dedupe(triplets)
}

/// Entity set as a set, keeping first occurrences
fn distinct(entity_set: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    entity_set
        .iter()
        .map(String::as_str)
        .filter(|e| seen.insert(*e))
        .collect()
}

fn dedupe(triplets: Vec<Triplet>) -> Vec<Triplet> {
    let mut seen = HashSet::new();
    triplets
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
