//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::commands::{find_record, load_dataset};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use claimgraph_domain::traits::KnowledgeGraphStore;
use claimgraph_domain::{ClaimRecord, Edge, Triplet};
use claimgraph_resolver::{substitute, Aggregation, Resolver, ResolverConfig};
use claimgraph_store::{
    load_triplets_file, CachedEmbeddingModel, EmbeddingSimilarity, MemoryGraph, MockEmbeddingModel,
    SqliteGraph, StoreError,
};
use claimgraph_synthesizer::augment;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Relation similarity used by the CLI
pub type Similarity = EmbeddingSimilarity<CachedEmbeddingModel<MockEmbeddingModel>>;

/// One ranked entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    /// Knowledge-graph entity
    pub entity: String,
    /// Aggregated score
    pub score: f32,
}

/// Ranked candidates for one placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderRanking {
    /// Placeholder identifier
    pub placeholder: String,
    /// Candidates, best first
    pub candidates: Vec<RankedCandidate>,
}

/// Resolution outcome for one claim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimResolution {
    /// Claim id
    pub id: String,
    /// Rankings in first-seen placeholder order
    pub placeholders: Vec<PlaceholderRanking>,
    /// Pseudo-subgraph with placeholders substituted
    pub triplets: Vec<Triplet>,
}

/// A knowledge graph opened from disk
pub enum GraphSource {
    /// TSV or JSON adjacency file loaded into memory
    Memory(MemoryGraph),
    /// SQLite edge table
    Sqlite(SqliteGraph),
}

impl GraphSource {
    /// Open `path`: `.db`/`.sqlite` files as SQLite, anything else as a triplet file.
    ///
    /// Either way incoming edges are visible as `~relation` out-edges, which
    /// is how placeholders written as `(unknown, r, A)` are looked up from `A`.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::InvalidInput(format!("Graph file not found: {}", path.display())));
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("db" | "sqlite" | "sqlite3") => {
                let graph = SqliteGraph::open(path)?.with_inverse_edges();
                info!(
                    "Opened SQLite graph: {} entities, {} edges",
                    graph.count_entities()?,
                    graph.count_edges()?
                );
                Ok(Self::Sqlite(graph))
            }
            _ => {
                let graph = MemoryGraph::from_triplets(load_triplets_file(path)?).with_inverse_edges();
                let stats = graph.stats();
                info!(
                    "Loaded graph: {} entities, {} edges, {} relations",
                    stats.entities, stats.edges, stats.relations
                );
                Ok(Self::Memory(graph))
            }
        }
    }
}

impl KnowledgeGraphStore for GraphSource {
    type Error = StoreError;

    fn out_edges(&self, entity: &str) -> std::result::Result<Vec<Edge>, Self::Error> {
        match self {
            Self::Memory(graph) => graph.out_edges(entity).map_err(|never| match never {}),
            Self::Sqlite(graph) => graph.out_edges(entity),
        }
    }

    fn contains_entity(&self, entity: &str) -> std::result::Result<bool, Self::Error> {
        match self {
            Self::Memory(graph) => graph.contains_entity(entity).map_err(|never| match never {}),
            Self::Sqlite(graph) => graph.contains_entity(entity),
        }
    }
}

/// Execute the resolve command.
pub fn execute_resolve(args: ResolveArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let resolver_config = effective_config(&config.resolver, args.top_k, args.aggregation.as_deref())?;
    let remove_underscore = config.settings.remove_underscore && !args.keep_underscores;

    let mut records = load_dataset(&args.dataset)?;
    if let Some(id) = &args.id {
        records = vec![(id.clone(), find_record(records, id)?)];
    }

    let graph = GraphSource::open(&args.graph)?;
    let resolver = build_resolver(graph, resolver_config, config.embedding.dimension)?;

    let mut claims = Vec::with_capacity(records.len());
    for (id, record) in records {
        claims.push(resolve_record(&resolver, id, record, remove_underscore)?);
    }

    println!("{}", formatter.format_resolutions(&claims)?);
    Ok(())
}

/// Apply command-line overrides on top of the configured ranking.
pub fn effective_config(
    base: &ResolverConfig,
    top_k: Option<usize>,
    aggregation: Option<&str>,
) -> Result<ResolverConfig> {
    let mut config = base.clone();
    if let Some(k) = top_k {
        config.top_k_candidates = k;
    }
    if let Some(mode) = aggregation {
        config.aggregation = mode.parse::<Aggregation>()?;
    }
    Ok(config)
}

/// Resolver over `graph` with the hashing embedding model.
pub fn build_resolver<G>(graph: G, config: ResolverConfig, dimension: usize) -> Result<Resolver<G, Similarity>>
where
    G: KnowledgeGraphStore,
    G::Error: Into<claimgraph_resolver::BoxError>,
{
    let sim = EmbeddingSimilarity::new(CachedEmbeddingModel::new(MockEmbeddingModel::new(dimension)));
    Ok(Resolver::new(graph, sim, config)?)
}

/// Resolve one record, synthesizing its pseudo-subgraph when missing.
pub fn resolve_record<G>(
    resolver: &Resolver<G, Similarity>,
    id: String,
    record: ClaimRecord,
    remove_underscore: bool,
) -> Result<ClaimResolution>
where
    G: KnowledgeGraphStore,
    G::Error: Into<claimgraph_resolver::BoxError>,
{
    let record = if record.triplet.is_some() {
        record
    } else {
        augment(record, remove_underscore)
    };
    let triplets = record.triplet.unwrap_or_default();

    let resolutions = resolver.resolve(&triplets)?;
    let substituted = substitute(&triplets, &resolutions);

    let placeholders = resolutions
        .into_iter()
        .map(|r| PlaceholderRanking {
            placeholder: r.placeholder,
            candidates: r
                .ranked
                .into_iter()
                .map(|(entity, score)| RankedCandidate { entity, score })
                .collect(),
        })
        .collect();

    Ok(ClaimResolution {
        id,
        placeholders,
        triplets: substituted,
    })
}
