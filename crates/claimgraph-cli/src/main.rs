//! Claimgraph CLI - Command-line interface for claim pseudo-subgraphs.

use claimgraph_cli::cli::{ConfigAction, ConfigArgs};
use claimgraph_cli::commands;
use claimgraph_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> claimgraph_cli::Result<()> {
    let cli = Cli::parse();

    // Log to stderr so stdout stays machine-readable
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config_path = Config::path(cli.config.as_deref())?;

    // `config init` must work even when the existing file is broken
    let config = match &cli.command {
        Command::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        }) => Config::default(),
        _ => Config::load_from(&config_path)?,
    };

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let formatter = Formatter::new(format, !cli.no_color && config.settings.color);

    match cli.command {
        Command::Parse(args) => commands::execute_parse(args, &formatter),
        Command::Synthesize(args) => commands::execute_synthesize(args, &config, &formatter),
        Command::Resolve(args) => commands::execute_resolve(args, &config, &formatter),
        Command::Verify(args) => commands::execute_verify(args, &config, &formatter).await,
        Command::Config(args) => commands::execute_config(args, &config, &config_path, &formatter),
    }
}
