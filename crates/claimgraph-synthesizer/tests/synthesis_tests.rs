//! Integration tests for pseudo-subgraph synthesis
//!
//! These tests drive the crate the way the pipeline does: JSON claim records
//! in, augmented records and parsed triplets out.

use claimgraph_domain::{ClaimRecord, Triplet};
use claimgraph_synthesizer::{
    augment, format_graph, parse_triplet_list, process_dataset, ParsedTriplet,
};

const DATASET: &str = r#"{
    "claim_0": {
        "Label": [true],
        "Entity_set": ["Huế"],
        "Evidence": {"Huế": [["~capital", "country"]]}
    },
    "claim_1": {
        "Label": [false],
        "Entity_set": ["Romeo_and_Juliet", "Europe"],
        "Evidence": {
            "Romeo_and_Juliet": [["written_by"]],
            "author": [["~written_by"], ["nationality"]],
            "Europe": [["~continent_of"]]
        }
    },
    "claim_2": {
        "Label": [true],
        "Entity_set": ["Alan_Bean", "Apollo_12"]
    }
}"#;

fn load() -> Vec<(String, ClaimRecord)> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(DATASET).unwrap();
    map.into_iter()
        .map(|(id, value)| (id, serde_json::from_value(value).unwrap()))
        .collect()
}

#[test]
fn test_dataset_pass_synthesizes_every_claim() {
    let (records, entities) = process_dataset(load(), true);
    assert_eq!(records.len(), 3);

    let single = records[0].1.triplet.as_ref().unwrap();
    assert_eq!(
        single,
        &vec![
            Triplet::new("unknown_0", "capital", "Huế"),
            Triplet::new("Huế", "country", "unknown_0"),
        ]
    );

    let multi = records[1].1.triplet.as_ref().unwrap();
    assert!(multi.contains(&Triplet::new("Romeo and Juliet", "written_by", "unknown_0")));
    assert!(multi.contains(&Triplet::new("Europe", "written_by", "unknown_0")));
    assert!(multi.contains(&Triplet::new("unknown_0", "nationality", "Europe")));
    assert!(multi.contains(&Triplet::new("Romeo and Juliet", "continent_of", "Europe")));

    assert!(records[2].1.triplet.as_ref().unwrap().is_empty());

    let names: Vec<&str> = entities.explicit().collect();
    assert_eq!(names, vec!["Europe", "Huế", "Romeo and Juliet"]);
}

#[test]
fn test_augmented_record_serializes_triplets() {
    let (mut records, _) = process_dataset(load(), false);
    let (_, record) = records.remove(0);

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["Label"], serde_json::json!([true]));
    assert_eq!(
        value["triplet"],
        serde_json::json!([["unknown_0", "capital", "Huế"], ["Huế", "country", "unknown_0"]])
    );
}

#[test]
fn test_rendered_graph_parses_back() {
    let record: ClaimRecord = serde_json::from_str(
        r#"{"Entity_set": ["A", "B"], "Evidence": {"A": [["r"]], "C": [["~s"]]}}"#,
    )
    .unwrap();
    let triplets = augment(record, false).triplet.unwrap();

    let reparsed: Vec<Triplet> = parse_triplet_list(&format_graph(&triplets))
        .into_iter()
        .map(ParsedTriplet::into_triplet)
        .collect();
    assert_eq!(reparsed, triplets);
}
