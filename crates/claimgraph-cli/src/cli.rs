//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Claimgraph CLI - Build, resolve and verify claim pseudo-subgraphs.
#[derive(Debug, Parser)]
#[command(name = "claimgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CLAIMGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (bare records)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse one `<e>A</e> || rel || <e>B</e>` record
    Parse(ParseArgs),

    /// Synthesize pseudo-subgraphs for a claim dataset
    Synthesize(SynthesizeArgs),

    /// Resolve placeholders against a knowledge graph
    Resolve(ResolveArgs),

    /// Ask an LLM for a verdict on a claim
    Verify(VerifyArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Triplet record
    pub record: String,

    /// Treat the input as a `;`-separated list and skip malformed records
    #[arg(short, long)]
    pub list: bool,
}

/// Arguments for the synthesize command.
#[derive(Debug, Parser)]
pub struct SynthesizeArgs {
    /// Dataset JSON (object keyed by claim id)
    pub input: PathBuf,

    /// Write the augmented dataset here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep underscores in entity names
    #[arg(long)]
    pub keep_underscores: bool,

    /// Write the distinct explicit entities here, one per line
    #[arg(long)]
    pub entities: Option<PathBuf>,
}

/// Arguments for the resolve command.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// Dataset JSON; records without triplets are synthesized first
    pub dataset: PathBuf,

    /// Knowledge graph: `.tsv`, `.json` adjacency, or `.db` SQLite file
    #[arg(short, long)]
    pub graph: PathBuf,

    /// Only resolve this claim id
    #[arg(long)]
    pub id: Option<String>,

    /// Candidates kept per placeholder (overrides config)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Score aggregation: max, mean or sum (overrides config)
    #[arg(short, long)]
    pub aggregation: Option<String>,

    /// Keep underscores in entity names when synthesizing
    #[arg(long)]
    pub keep_underscores: bool,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Claim text (defaults to the record's own claim text)
    pub claim: Option<String>,

    /// Dataset JSON holding the claim record
    #[arg(short, long)]
    pub dataset: PathBuf,

    /// Claim id within the dataset
    #[arg(long)]
    pub id: String,

    /// Substitute placeholders using this knowledge graph first
    #[arg(short, long)]
    pub graph: Option<PathBuf>,

    /// Check the pseudo-subgraph first and relabel it when judged incorrect
    #[arg(long)]
    pub check: bool,

    /// Ollama model (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        let cli = Cli::parse_from(["claimgraph", "parse", "<e>A</e> || r || <e>B</e>"]);
        match cli.command {
            Command::Parse(args) => {
                assert_eq!(args.record, "<e>A</e> || r || <e>B</e>");
                assert!(!args.list);
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_resolve_command() {
        let cli = Cli::parse_from([
            "claimgraph",
            "resolve",
            "claims.json",
            "--graph",
            "kg.tsv",
            "-k",
            "3",
            "--aggregation",
            "mean",
            "--format",
            "json",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.graph, PathBuf::from("kg.tsv"));
                assert_eq!(args.top_k, Some(3));
                assert_eq!(args.aggregation.as_deref(), Some("mean"));
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_verify_requires_dataset_and_id() {
        assert!(Cli::try_parse_from(["claimgraph", "verify", "claim"]).is_err());
        let cli = Cli::try_parse_from([
            "claimgraph", "verify", "--dataset", "d.json", "--id", "7", "--check",
        ])
        .unwrap();
        match cli.command {
            Command::Verify(args) => {
                assert!(args.claim.is_none());
                assert!(args.check);
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["claimgraph", "-v", "config", "init", "--force"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs { action: ConfigAction::Init { force: true } })
        ));
    }
}
