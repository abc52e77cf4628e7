//! Integration tests for the CLI commands

use claimgraph_cli::commands::config::init_config;
use claimgraph_cli::commands::resolve::{build_resolver, resolve_record, GraphSource};
use claimgraph_cli::commands::synthesize::{synthesize_file, write_entities};
use claimgraph_cli::commands::verify::{verify_record, VerifyOptions};
use claimgraph_cli::commands::{dataset_to_json, find_record, load_dataset};
use claimgraph_cli::{CliError, Config};
use claimgraph_domain::{ClaimRecord, Triplet};
use claimgraph_llm::MockProvider;
use claimgraph_resolver::ResolverConfig;
use claimgraph_store::SqliteGraph;
use claimgraph_synthesizer::augment;
use claimgraph_verifier::{GraphCheck, PromptBuilder, Verdict, Verifier, VerifierConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DATASET: &str = r#"{
    "c2": {
        "claim": "Hue is located in a country.",
        "Entity_set": ["Hue"],
        "Evidence": {"Hue": [["country"]]}
    },
    "c1": {
        "claim": "The capital of the country where Hue is located is Hanoi.",
        "Entity_set": ["Hue", "Hanoi"],
        "Evidence": {"Hue": [["country"]], "Hanoi": [["~capital"]]},
        "label": true
    }
}"#;

const KG_TSV: &str = "# head\trelation\ttail\n\
Hue\tcountry\tVietnam\n\
Hue\tleader\tNguyen_Van_A\n\
Vietnam\tcapital\tHanoi\n";

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn record(id: &str) -> ClaimRecord {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "claims.json", DATASET);
    find_record(load_dataset(&path).unwrap(), id).unwrap()
}

#[test]
fn test_synthesize_keeps_order_and_extra_fields() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "claims.json", DATASET);

    let (records, entities) = synthesize_file(&input, true).unwrap();
    let ids: Vec<&str> = records.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["c2", "c1"]);

    let json = dataset_to_json(&records).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["c2"]["triplet"], serde_json::json!([["Hue", "country", "unknown_0"]]));
    assert_eq!(value["c1"]["label"], serde_json::json!(true));
    assert!(json.find("\"c2\"").unwrap() < json.find("\"c1\"").unwrap());

    let entities_path = dir.path().join("entities.txt");
    write_entities(&entities_path, &entities).unwrap();
    let written = fs::read_to_string(&entities_path).unwrap();
    assert_eq!(written, "Hanoi\nHue\n");
}

#[test]
fn test_load_dataset_array_and_bad_shape() {
    let dir = TempDir::new().unwrap();
    let array = write(&dir, "array.json", r#"[{"Entity_set": ["A"], "Evidence": {"A": [["r"]]}}]"#);
    let records = load_dataset(&array).unwrap();
    assert_eq!(records[0].0, "0");
    assert_eq!(records[0].1.entity_set, vec!["A".to_string()]);

    let scalar = write(&dir, "scalar.json", "42");
    assert!(matches!(load_dataset(&scalar), Err(CliError::InvalidInput(_))));

    assert!(matches!(find_record(records, "missing"), Err(CliError::InvalidInput(_))));
}

#[test]
fn test_config_init_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());

    let written = init_config(&path, false).unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), written);
    assert!(matches!(init_config(&path, false), Err(CliError::Config(_))));
    assert!(init_config(&path, true).is_ok());
}

#[test]
fn test_config_file_is_validated() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.toml", "[resolver]\ntop_k_candidates = 0\n");
    assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));

    let path = write(&dir, "broken.toml", "[settings\n");
    assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));
}

#[test]
fn test_resolve_against_tsv_graph() {
    let dir = TempDir::new().unwrap();
    let graph = GraphSource::open(&write(&dir, "kg.tsv", KG_TSV)).unwrap();
    let resolver = build_resolver(graph, ResolverConfig::default(), 128).unwrap();

    let claim = resolve_record(&resolver, "c2".to_string(), record("c2"), true).unwrap();
    assert_eq!(claim.placeholders[0].candidates[0].entity, "Vietnam");
    assert_eq!(claim.triplets[0], Triplet::new("Hue", "country", "Vietnam"));
}

#[test]
fn test_sqlite_and_tsv_graphs_agree() {
    let dir = TempDir::new().unwrap();
    let tsv = write(&dir, "kg.tsv", KG_TSV);
    let db = dir.path().join("kg.db");
    {
        let triplets = claimgraph_store::load_triplets_file(&tsv).unwrap();
        let mut sqlite = SqliteGraph::open(&db).unwrap();
        assert_eq!(sqlite.insert_triples(&triplets).unwrap(), 3);
    }

    let resolve = |path: &Path| {
        let resolver = build_resolver(GraphSource::open(path).unwrap(), ResolverConfig::default(), 128).unwrap();
        resolve_record(&resolver, "c2".to_string(), record("c2"), true).unwrap()
    };
    assert_eq!(resolve(&tsv), resolve(&db));
}

const INVERSE_KG_TSV: &str = "Vietnam\tcapital\tHue\n\
Hue\tlocated_in\tAsia\n";

fn inverse_only_record() -> ClaimRecord {
    serde_json::from_str(r#"{"Entity_set": ["Hue"], "Evidence": {"Hue": [["~capital"]]}}"#).unwrap()
}

fn assert_resolves_to_incoming_head(graph: GraphSource) {
    let resolver = build_resolver(graph, ResolverConfig::default(), 128).unwrap();
    let claim = resolve_record(&resolver, "inv".to_string(), inverse_only_record(), true).unwrap();

    assert_eq!(claim.placeholders[0].placeholder, "unknown_0");
    assert_eq!(claim.placeholders[0].candidates[0].entity, "Vietnam");
    assert_eq!(claim.triplets[0], Triplet::new("Vietnam", "capital", "Hue"));
}

#[test]
fn test_inverse_evidence_resolves_through_tsv_graph() {
    let dir = TempDir::new().unwrap();
    let graph = GraphSource::open(&write(&dir, "kg.tsv", INVERSE_KG_TSV)).unwrap();
    assert_resolves_to_incoming_head(graph);
}

#[test]
fn test_inverse_evidence_resolves_through_sqlite_graph() {
    let dir = TempDir::new().unwrap();
    let tsv = write(&dir, "kg.tsv", INVERSE_KG_TSV);
    let db = dir.path().join("kg.sqlite");
    {
        let mut sqlite = SqliteGraph::open(&db).unwrap();
        sqlite
            .insert_triples(&claimgraph_store::load_triplets_file(&tsv).unwrap())
            .unwrap();
    }
    assert_resolves_to_incoming_head(GraphSource::open(&db).unwrap());
}

#[test]
fn test_inverse_pair_adds_support() {
    let dir = TempDir::new().unwrap();
    let graph = GraphSource::open(&write(&dir, "kg.tsv", KG_TSV)).unwrap();
    let resolver = build_resolver(graph, ResolverConfig::strict(), 128).unwrap();

    // Hanoi has no out-edges of its own; Vietnam is reachable only backwards
    let relabelled = vec![
        Triplet::new("Hue", "country", "unknown_0"),
        Triplet::new("unknown_0", "capital", "Hanoi"),
    ];
    let resolutions = resolver.resolve(&relabelled).unwrap();
    let context: Vec<&str> = resolutions[0].context.edges().iter().map(|e| e.entity.as_str()).collect();
    assert_eq!(context, vec!["Hue", "Hanoi"]);
    assert_eq!(resolutions[0].best(), Some("Vietnam"));

    let hanoi_only = resolver.resolve(&relabelled[1..]).unwrap();
    assert_eq!(hanoi_only[0].best(), Some("Vietnam"));
}

#[tokio::test]
async fn test_verify_uses_record_claim_text() {
    let llm = MockProvider::new("Supported. Hue is in Vietnam.");
    let verifier = Verifier::new(llm.clone(), VerifierConfig::default()).unwrap();

    let options = VerifyOptions::<GraphSource> {
        claim: None,
        resolver: None,
        check: false,
        remove_underscore: true,
    };
    let report = verify_record(&verifier, "c2".to_string(), record("c2"), options).await.unwrap();

    assert_eq!(report.claim, "Hue is located in a country.");
    assert_eq!(report.result.verdict, Verdict::Supported);
    assert_eq!(report.evidence, vec![Triplet::new("Hue", "country", "unknown_0")]);
    assert!(report.graph_check.is_none());
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_verify_relabels_incorrect_graph_then_resolves() {
    let augmented = augment(record("c1"), true);
    let claim_data = serde_json::to_string(&augmented).unwrap();
    let config = VerifierConfig::default();
    let prompts = PromptBuilder::new(&config);

    let mut llm = MockProvider::new("Refuted. The capital is elsewhere.");
    llm.add_response(
        prompts
            .graph_check(&claim_data, augmented.triplet.as_deref().unwrap())
            .prompt,
        "INCORRECT",
    );
    llm.add_response(
        prompts
            .relabel(&claim_data, &augmented.entity_set, &augmented.evidence)
            .unwrap()
            .prompt,
        "<e>Hue</e> || country || <e>unknown_0</e>; <e>unknown_0</e> || capital || <e>Hanoi</e>",
    );
    let verifier = Verifier::new(llm.clone(), config.clone()).unwrap();

    let dir = TempDir::new().unwrap();
    let graph = GraphSource::open(&write(&dir, "kg.tsv", KG_TSV)).unwrap();
    let resolver = build_resolver(graph, ResolverConfig::strict(), 128).unwrap();

    let options = VerifyOptions {
        claim: Some("Hue's country has Hanoi as capital.".to_string()),
        resolver: Some(&resolver),
        check: true,
        remove_underscore: true,
    };
    let report = verify_record(&verifier, "c1".to_string(), record("c1"), options).await.unwrap();

    assert_eq!(report.graph_check, Some(GraphCheck::Incorrect));
    assert_eq!(report.evidence[0], Triplet::new("Hue", "country", "Vietnam"));
    assert!(report.evidence.contains(&Triplet::new("Vietnam", "capital", "Hanoi")));
    assert_eq!(report.result.verdict, Verdict::Refuted);
    assert_eq!(llm.call_count(), 3);
}

#[tokio::test]
async fn test_verify_without_claim_text_fails() {
    let verifier = Verifier::new(MockProvider::new("Supported"), VerifierConfig::default()).unwrap();
    let bare: ClaimRecord =
        serde_json::from_str(r#"{"Entity_set": ["Hue"], "Evidence": {"Hue": [["country"]]}}"#).unwrap();

    let options = VerifyOptions::<GraphSource> {
        claim: None,
        resolver: None,
        check: false,
        remove_underscore: true,
    };
    let result = verify_record(&verifier, "x".to_string(), bare, options).await;
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
}
