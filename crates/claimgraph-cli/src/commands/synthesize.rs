//! Synthesize command implementation.

use crate::cli::SynthesizeArgs;
use crate::commands::{dataset_to_json, load_dataset};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use claimgraph_domain::ClaimRecord;
use claimgraph_synthesizer::{process_dataset, EntityAccumulator};
use std::fs;
use std::path::Path;
use tracing::info;

/// Execute the synthesize command.
pub fn execute_synthesize(args: SynthesizeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let remove_underscore = config.settings.remove_underscore && !args.keep_underscores;
    let (records, entities) = synthesize_file(&args.input, remove_underscore)?;

    if let Some(path) = &args.entities {
        write_entities(path, &entities)?;
        println!(
            "{}",
            formatter.info(&format!("Wrote {} entities to {}", entities.explicit().count(), path.display()))
        );
    }

    let json = dataset_to_json(&records)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            let triplets: usize = records
                .iter()
                .map(|(_, r)| r.triplet.as_ref().map_or(0, Vec::len))
                .sum();
            println!(
                "{}",
                formatter.success(&format!(
                    "Synthesized {} triplets for {} claims into {}",
                    triplets,
                    records.len(),
                    path.display()
                ))
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Load a dataset and fill every record's `triplet` field.
pub fn synthesize_file(
    input: &Path,
    remove_underscore: bool,
) -> Result<(Vec<(String, ClaimRecord)>, EntityAccumulator)> {
    let records = load_dataset(input)?;
    info!("Loaded {} claims from {}", records.len(), input.display());
    Ok(process_dataset(records, remove_underscore))
}

/// Write the explicit entity names, one per line.
pub fn write_entities(path: &Path, entities: &EntityAccumulator) -> Result<()> {
    let mut contents = entities.explicit().collect::<Vec<_>>().join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    fs::write(path, contents)?;
    Ok(())
}
