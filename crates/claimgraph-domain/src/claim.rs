//! Claim record - the extracted pseudo-subgraph description of one claim

use crate::triplet::Triplet;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ordered sequence of raw relation tokens (a relation path)
pub type RelationGroup = Vec<String>;

/// Ordered mapping `entity -> relation groups`
///
/// Key order is significant: placeholder numbering and triplet order both
/// follow it, so the map is kept as a vector of entries and (de)serialized
/// as a JSON object without reordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence {
    entries: Vec<(String, Vec<RelationGroup>)>,
}

impl Evidence {
    /// Create an empty evidence map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the groups for `entity`
    ///
    /// A replaced entry keeps its original position.
    pub fn insert(&mut self, entity: impl Into<String>, groups: Vec<RelationGroup>) {
        let entity = entity.into();
        match self.entries.iter_mut().find(|(key, _)| *key == entity) {
            Some(entry) => entry.1 = groups,
            None => self.entries.push((entity, groups)),
        }
    }

    /// Groups attached to `entity`, if present
    pub fn get(&self, entity: &str) -> Option<&[RelationGroup]> {
        self.entries
            .iter()
            .find(|(key, _)| key == entity)
            .map(|(_, groups)| groups.as_slice())
    }

    /// Iterate entries in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RelationGroup])> {
        self.entries
            .iter()
            .map(|(key, groups)| (key.as_str(), groups.as_slice()))
    }

    /// Iterate keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of entities with evidence
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is no evidence at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, G> FromIterator<(K, G)> for Evidence
where
    K: Into<String>,
    G: IntoIterator<Item = RelationGroup>,
{
    fn from_iter<I: IntoIterator<Item = (K, G)>>(iter: I) -> Self {
        let mut evidence = Evidence::new();
        for (key, groups) in iter {
            evidence.insert(key, groups.into_iter().collect());
        }
        evidence
    }
}

impl Serialize for Evidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, groups) in &self.entries {
            map.serialize_entry(key, groups)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Evidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EvidenceVisitor;

        impl<'de> Visitor<'de> for EvidenceVisitor {
            type Value = Evidence;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from entity name to lists of relation paths")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Evidence, A::Error> {
                let mut evidence = Evidence::new();
                while let Some((key, groups)) =
                    access.next_entry::<String, Vec<RelationGroup>>()?
                {
                    evidence.insert(key, groups);
                }
                Ok(evidence)
            }
        }

        deserializer.deserialize_map(EvidenceVisitor)
    }
}

/// A claim as produced by the upstream extraction step
///
/// Field names follow the extraction output (`Entity_set`, `Evidence`).
/// Any other fields (labels, claim text) are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Entities explicitly named in the claim
    #[serde(rename = "Entity_set", default)]
    pub entity_set: Vec<String>,

    /// Relation paths per entity; keys absent from `entity_set` are implicit
    #[serde(rename = "Evidence", default)]
    pub evidence: Evidence,

    /// Synthesized pseudo-subgraph, filled in by the synthesizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triplet: Option<Vec<Triplet>>,

    /// Remaining fields of the source record
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ClaimRecord {
    /// Create a record from an entity set and evidence
    pub fn new(entity_set: Vec<String>, evidence: Evidence) -> Self {
        Self {
            entity_set,
            evidence,
            ..Self::default()
        }
    }

    /// Entity names that appear only as evidence keys
    pub fn implicit_entities(&self) -> impl Iterator<Item = &str> {
        self.evidence
            .keys()
            .filter(|key| !self.entity_set.iter().any(|e| e == key))
    }

    /// Claim text, if the record carries one
    pub fn claim_text(&self) -> Option<&str> {
        ["claim", "Claim", "question"]
            .iter()
            .find_map(|field| self.extra.get(*field).and_then(|v| v.as_str()))
    }
}
