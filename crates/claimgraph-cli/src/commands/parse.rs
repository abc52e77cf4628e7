//! Parse command implementation.

use crate::cli::ParseArgs;
use crate::error::Result;
use crate::output::Formatter;
use claimgraph_synthesizer::{parse_triplet, parse_triplet_list, ParsedTriplet};

/// Execute the parse command.
pub fn execute_parse(args: ParseArgs, formatter: &Formatter) -> Result<()> {
    let parsed = parse_input(&args.record, args.list)?;
    println!("{}", formatter.format_parsed(&parsed)?);
    Ok(())
}

/// Parse a single strict record, or a lenient `;`-separated list.
pub fn parse_input(input: &str, list: bool) -> Result<Vec<ParsedTriplet>> {
    if list {
        Ok(parse_triplet_list(input))
    } else {
        Ok(vec![parse_triplet(input)?])
    }
}
