//! Whole-dataset synthesis pass

use crate::synthesis::synthesize_record;
use claimgraph_domain::{is_placeholder, ClaimRecord, Triplet};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Distinct entity names seen across a dataset pass
///
/// Collects the head and tail of every synthesized triplet. The value is
/// returned from [`process_dataset`] and can be merged across passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityAccumulator {
    entities: BTreeSet<String>,
}

impl EntityAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record both endpoints of every triplet
    pub fn record(&mut self, triplets: &[Triplet]) {
        for triplet in triplets {
            self.entities.insert(triplet.head.clone());
            self.entities.insert(triplet.tail.clone());
        }
    }

    /// Fold another accumulator into this one
    pub fn merge(mut self, other: EntityAccumulator) -> Self {
        self.entities.extend(other.entities);
        self
    }

    /// All recorded names, sorted
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(String::as_str)
    }

    /// Recorded names that are not placeholders
    pub fn explicit(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|name| !is_placeholder(name))
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Consume into a sorted vector
    pub fn into_vec(self) -> Vec<String> {
        self.entities.into_iter().collect()
    }
}

/// Synthesize triplets for every record of an id-keyed dataset
///
/// Records keep their input order. Returns the augmented records together
/// with the distinct entities of all triplets.
pub fn process_dataset<I>(records: I, remove_underscore: bool) -> (Vec<(String, ClaimRecord)>, EntityAccumulator)
where
    I: IntoIterator<Item = (String, ClaimRecord)>,
{
    let mut accumulator = EntityAccumulator::new();
    let mut processed = Vec::new();

    for (id, mut record) in records {
        let triplets = synthesize_record(&mut record, remove_underscore);
        debug!("Claim {}: {} triplets", id, triplets.len());
        accumulator.record(triplets);
        processed.push((id, record));
    }

    info!(
        "Processed {} claims, {} distinct entities",
        processed.len(),
        accumulator.len()
    );

    (processed, accumulator)
}
