//! End-to-end tests: synthesize a pseudo-subgraph, then resolve it

use claimgraph_domain::{ClaimRecord, Triplet};
use claimgraph_resolver::{
    rank, score, substitute, Aggregation, NodeContext, Resolver, ResolverConfig, ResolverError,
};
use claimgraph_store::{EmbeddingSimilarity, MemoryGraph, MockEmbeddingModel, SqliteGraph};
use claimgraph_synthesizer::augment;

fn knowledge_graph() -> Vec<Triplet> {
    vec![
        Triplet::new("Hue", "country", "Vietnam"),
        Triplet::new("Hue", "leader", "Nguyen_Van_A"),
        Triplet::new("Hue", "timezone", "ICT"),
        Triplet::new("Hanoi", "capital of", "Vietnam"),
        Triplet::new("Hanoi", "country", "Vietnam"),
        Triplet::new("Saigon", "country", "Vietnam"),
    ]
}

fn similarity() -> EmbeddingSimilarity<MockEmbeddingModel> {
    EmbeddingSimilarity::new(MockEmbeddingModel::new(384))
}

fn record(json: &str) -> ClaimRecord {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_forward_placeholder_resolves() {
    let claim = augment(
        record(r#"{"Entity_set": ["Hue"], "Evidence": {"Hue": [["country"]]}}"#),
        false,
    );
    let triplets = claim.triplet.clone().unwrap();
    assert_eq!(triplets, vec![Triplet::new("Hue", "country", "unknown_0")]);

    let graph = MemoryGraph::from_triplets(knowledge_graph());
    let resolver = Resolver::new(graph, similarity(), ResolverConfig::default()).unwrap();
    let resolutions = resolver.resolve(&triplets).unwrap();

    assert_eq!(resolutions[0].placeholder, "unknown_0");
    assert_eq!(resolutions[0].best(), Some("Vietnam"));

    let grounded = substitute(&triplets, &resolutions);
    assert_eq!(grounded[0], Triplet::new("Hue", "country", "Vietnam"));
}

#[test]
fn test_inverse_placeholder_uses_inverse_edges() {
    let claim = augment(
        record(r#"{"Entity_set": ["Vietnam"], "Evidence": {"Vietnam": [["~capital of"]]}}"#),
        false,
    );
    let triplets = claim.triplet.unwrap();
    assert_eq!(triplets, vec![Triplet::new("unknown_0", "capital of", "Vietnam")]);

    let graph = MemoryGraph::from_triplets(knowledge_graph()).with_inverse_edges();
    let resolver = Resolver::new(graph, similarity(), ResolverConfig::strict()).unwrap();
    let resolutions = resolver.resolve(&triplets).unwrap();

    assert_eq!(resolutions[0].best(), Some("Hanoi"));
}

#[test]
fn test_backends_rank_identically() {
    let triplets = vec![Triplet::new("Hue", "country", "unknown_0")];
    let memory = MemoryGraph::from_triplets(knowledge_graph());
    let mut sqlite = SqliteGraph::in_memory().unwrap();
    sqlite.insert_triples(&knowledge_graph()).unwrap();

    let config = ResolverConfig::broad();
    let from_memory = Resolver::new(memory, similarity(), config.clone())
        .unwrap()
        .resolve(&triplets)
        .unwrap();
    let from_sqlite = Resolver::new(sqlite, similarity(), config)
        .unwrap()
        .resolve(&triplets)
        .unwrap();

    assert_eq!(from_memory, from_sqlite);
}

#[test]
fn test_score_and_rank_with_real_similarity() {
    let graph = MemoryGraph::from_triplets(knowledge_graph());
    let sim = similarity();
    let context = NodeContext::from_parallel(&["Hue", "Hanoi"], &["country", "country"]).unwrap();

    let vietnam = score("Vietnam", &context, &graph, &sim, true).unwrap();
    assert!(vietnam > 0.5);
    assert_eq!(score("Paris", &context, &graph, &sim, true).unwrap(), 0.0);

    let groups = vec![
        vec!["Vietnam".to_string(), "Nguyen_Van_A".to_string()],
        vec!["Vietnam".to_string()],
    ];
    let ranked = rank(&groups, &context, &graph, &sim, 10, true, Aggregation::Mean).unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].0, "Vietnam");
    assert_eq!(ranked[1].0, "Nguyen_Van_A");
    assert!(ranked[1].1 < ranked[0].1, "leader is a weaker match for country");
}

#[test]
fn test_mode_parsed_at_boundary() {
    let err = "top3".parse::<Aggregation>().unwrap_err();
    assert!(matches!(err, ResolverError::InvalidArgument(_)));
}
