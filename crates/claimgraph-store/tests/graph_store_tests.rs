//! Integration tests for claimgraph-store
//!
//! These tests load graph files from disk and check that both backends
//! answer lookups the same way.

use claimgraph_domain::traits::KnowledgeGraphStore;
use claimgraph_domain::{Edge, Triplet};
use claimgraph_store::{load_triplets_file, MemoryGraph, SqliteGraph, StoreError};
use std::fs;
use tempfile::TempDir;

const TSV: &str = "\
# head\trelation\ttail
Hue\tcountry\tVietnam
Hue\tleader\tNguyen
Hanoi\tcapital_of\tVietnam
Hue\tcountry\tVietnam
";

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_tsv_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "kg.tsv", TSV);

    let triplets = load_triplets_file(&path).unwrap();
    assert_eq!(triplets.len(), 4, "Loader keeps duplicates; stores drop them");
    assert_eq!(triplets[0], Triplet::new("Hue", "country", "Vietnam"));
}

#[test]
fn test_load_json_file_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "kg.JSON",
        r#"{"Hue": {"country": ["Vietnam"]}, "Hanoi": {"capital_of": "Vietnam"}}"#,
    );

    let triplets = load_triplets_file(&path).unwrap();
    assert_eq!(
        triplets,
        vec![
            Triplet::new("Hue", "country", "Vietnam"),
            Triplet::new("Hanoi", "capital_of", "Vietnam"),
        ]
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_triplets_file(dir.path().join("absent.tsv"));
    assert!(matches!(result, Err(StoreError::Io(_))));
}

#[test]
fn test_malformed_json_is_json_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "kg.json", "{not json");
    assert!(matches!(load_triplets_file(&path), Err(StoreError::Json(_))));
}

#[test]
fn test_backends_agree() {
    let dir = TempDir::new().unwrap();
    let triplets = load_triplets_file(write(&dir, "kg.tsv", TSV)).unwrap();

    let memory = MemoryGraph::from_triplets(triplets.clone());
    let mut sqlite = SqliteGraph::in_memory().unwrap();
    assert_eq!(sqlite.insert_triples(&triplets).unwrap(), 3);

    for entity in ["Hue", "Hanoi", "Vietnam", "Paris"] {
        assert_eq!(
            memory.out_edges(entity).unwrap(),
            sqlite.out_edges(entity).unwrap(),
            "out_edges({entity}) differs"
        );
        assert_eq!(
            memory.contains_entity(entity).unwrap(),
            sqlite.contains_entity(entity).unwrap()
        );
    }

    assert_eq!(memory.entity_names(), sqlite.entity_names().unwrap());
    assert_eq!(memory.stats().entities, sqlite.count_entities().unwrap());
    assert_eq!(memory.stats().edges, sqlite.count_edges().unwrap());
}

#[test]
fn test_backends_agree_with_inverse_edges() {
    let dir = TempDir::new().unwrap();
    let triplets = load_triplets_file(write(&dir, "kg.tsv", TSV)).unwrap();

    let memory = MemoryGraph::from_triplets(triplets.clone()).with_inverse_edges();
    let mut sqlite = SqliteGraph::in_memory().unwrap();
    sqlite.insert_triples(&triplets).unwrap();
    let sqlite = sqlite.with_inverse_edges();

    assert_eq!(
        sqlite.out_edges("Vietnam").unwrap(),
        vec![Edge::new("~country", "Hue"), Edge::new("~capital_of", "Hanoi")]
    );
    for entity in ["Hue", "Hanoi", "Vietnam", "Nguyen", "Paris"] {
        assert_eq!(
            memory.out_edges(entity).unwrap(),
            sqlite.out_edges(entity).unwrap(),
            "out_edges({entity}) differs"
        );
        assert_eq!(
            memory.contains_entity(entity).unwrap(),
            sqlite.contains_entity(entity).unwrap(),
            "contains_entity({entity}) differs"
        );
    }
}

#[test]
fn test_sqlite_persists_between_opens() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("kg.db");

    {
        let mut graph = SqliteGraph::open(&db).unwrap();
        graph
            .insert_triples(&[
                Triplet::new("Hue", "country", "Vietnam"),
                Triplet::new("Hanoi", "capital_of", "Vietnam"),
            ])
            .unwrap();
    }

    let graph = SqliteGraph::open(&db).unwrap();
    assert_eq!(graph.out_edges("Hanoi").unwrap(), vec![Edge::new("capital_of", "Vietnam")]);

    let connections = graph.connections("Vietnam").unwrap();
    assert_eq!(connections.len(), 2);
    assert!(connections.iter().all(|t| t.tail == "Vietnam"));
}
