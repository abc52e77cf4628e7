//! Knowledge graph file loaders
//!
//! Two layouts are understood:
//!
//! - **TSV**: one `head<TAB>relation<TAB>tail` edge per line. Blank lines and
//!   lines starting with `#` are skipped.
//! - **JSON adjacency**: `{"head": {"relation": ["tail", ...]}}`; a single
//!   tail may be given as a bare string.

use crate::StoreError;
use claimgraph_domain::Triplet;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Parse TSV edge lines
pub fn parse_tsv(content: &str) -> Result<Vec<Triplet>, StoreError> {
    let mut triplets = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let columns: Vec<&str> = line.split('\t').map(str::trim).collect();
        match columns.as_slice() {
            [head, relation, tail] => triplets.push(Triplet::new(*head, *relation, *tail)),
            _ => {
                return Err(StoreError::InvalidData(format!(
                    "line {}: expected 3 tab-separated columns, got {}",
                    number + 1,
                    columns.len()
                )))
            }
        }
    }
    Ok(triplets)
}

/// Parse a JSON adjacency document
pub fn parse_json_adjacency(content: &str) -> Result<Vec<Triplet>, StoreError> {
    let root: Value = serde_json::from_str(content)?;
    let heads = root
        .as_object()
        .ok_or_else(|| StoreError::InvalidData("expected a JSON object of heads".to_string()))?;

    let mut triplets = Vec::new();
    for (head, relations) in heads {
        let relations = relations.as_object().ok_or_else(|| {
            StoreError::InvalidData(format!("relations of {head:?} must be an object"))
        })?;
        for (relation, tails) in relations {
            match tails {
                Value::String(tail) => triplets.push(Triplet::new(head.as_str(), relation.as_str(), tail.as_str())),
                Value::Array(items) => {
                    for item in items {
                        let tail = item.as_str().ok_or_else(|| {
                            StoreError::InvalidData(format!(
                                "tail of {head:?} --{relation}--> must be a string"
                            ))
                        })?;
                        triplets.push(Triplet::new(head.as_str(), relation.as_str(), tail));
                    }
                }
                _ => {
                    return Err(StoreError::InvalidData(format!(
                        "tails of {head:?} --{relation}--> must be a string or a list"
                    )))
                }
            }
        }
    }
    Ok(triplets)
}

/// Load a TSV edge file
pub fn load_tsv<P: AsRef<Path>>(path: P) -> Result<Vec<Triplet>, StoreError> {
    parse_tsv(&fs::read_to_string(path)?)
}

/// Load a JSON adjacency file
pub fn load_json_adjacency<P: AsRef<Path>>(path: P) -> Result<Vec<Triplet>, StoreError> {
    parse_json_adjacency(&fs::read_to_string(path)?)
}

/// Load a graph file, choosing the layout by extension
///
/// `.json` files are read as adjacency documents; anything else as TSV.
pub fn load_triplets_file<P: AsRef<Path>>(path: P) -> Result<Vec<Triplet>, StoreError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let triplets = if is_json {
        load_json_adjacency(path)?
    } else {
        load_tsv(path)?
    };
    info!("Loaded {} edges from {}", triplets.len(), path.display());
    Ok(triplets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv_skips_comments_and_blanks() {
        let content = "# kg\nHue\tcountry\tVietnam\n\n Hanoi \tcapital_of\tVietnam\r\n";
        let triplets = parse_tsv(content).unwrap();
        assert_eq!(
            triplets,
            vec![
                Triplet::new("Hue", "country", "Vietnam"),
                Triplet::new("Hanoi", "capital_of", "Vietnam"),
            ]
        );
    }

    #[test]
    fn test_parse_tsv_reports_line_number() {
        let err = parse_tsv("A\tr\tB\nbroken line\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_json_adjacency() {
        let content = r#"{"Hue": {"country": "Vietnam", "leader": ["Nguyen", "Tran"]}}"#;
        let triplets = parse_json_adjacency(content).unwrap();
        assert_eq!(
            triplets,
            vec![
                Triplet::new("Hue", "country", "Vietnam"),
                Triplet::new("Hue", "leader", "Nguyen"),
                Triplet::new("Hue", "leader", "Tran"),
            ]
        );
    }

    #[test]
    fn test_parse_json_rejects_bad_shapes() {
        assert!(parse_json_adjacency("[1, 2]").is_err());
        assert!(parse_json_adjacency(r#"{"Hue": ["x"]}"#).is_err());
        assert!(parse_json_adjacency(r#"{"Hue": {"r": 3}}"#).is_err());
        assert!(parse_json_adjacency(r#"{"Hue": {"r": [3]}}"#).is_err());
    }
}
