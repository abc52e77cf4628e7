//! Command implementations.

pub mod config;
pub mod parse;
pub mod resolve;
pub mod synthesize;
pub mod verify;

pub use self::config::execute_config;
pub use self::parse::execute_parse;
pub use self::resolve::execute_resolve;
pub use self::synthesize::execute_synthesize;
pub use self::verify::execute_verify;

use crate::error::{CliError, Result};
use claimgraph_domain::ClaimRecord;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a claim dataset.
///
/// Accepts an object keyed by claim id (order kept) or an array, whose
/// records get their index as id.
pub fn load_dataset(path: &Path) -> Result<Vec<(String, ClaimRecord)>> {
    let contents = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&contents)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(id, value)| Ok::<_, CliError>((id, serde_json::from_value(value)?)))
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, value)| Ok::<_, CliError>((i.to_string(), serde_json::from_value(value)?)))
            .collect(),
        _ => Err(CliError::InvalidInput(format!(
            "{}: expected a JSON object or array of claim records",
            path.display()
        ))),
    }
}

/// Render records as an id-keyed JSON object.
pub fn dataset_to_json(records: &[(String, ClaimRecord)]) -> Result<String> {
    let mut map = serde_json::Map::new();
    for (id, record) in records {
        map.insert(id.clone(), serde_json::to_value(record)?);
    }
    Ok(serde_json::to_string_pretty(&Value::Object(map))?)
}

/// Pick one record by id.
pub fn find_record(records: Vec<(String, ClaimRecord)>, id: &str) -> Result<ClaimRecord> {
    records
        .into_iter()
        .find(|(key, _)| key == id)
        .map(|(_, record)| record)
        .ok_or_else(|| CliError::InvalidInput(format!("Claim id '{}' not found in dataset", id)))
}
