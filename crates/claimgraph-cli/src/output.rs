//! Output formatting for the CLI.

use crate::commands::resolve::ClaimResolution;
use crate::commands::verify::VerificationReport;
use crate::config::OutputFormat;
use crate::error::Result;
use claimgraph_domain::Triplet;
use claimgraph_synthesizer::{format_triplet, ParsedTriplet};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format parsed triplet records.
    pub fn format_parsed(&self, parsed: &[ParsedTriplet]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = parsed
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "subject": p.subject,
                            "relation": p.relation,
                            "object": p.object,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => {
                if parsed.is_empty() {
                    return Ok(self.colorize("No triplets found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Subject", "Relation", "Object"]);
                for p in parsed {
                    builder.push_record([p.subject.as_str(), p.relation.as_str(), p.object.as_str()]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(parsed
                .iter()
                .map(|p| format!("{}\t{}\t{}", p.subject, p.relation, p.object))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a triplet list.
    pub fn format_triplets(&self, triplets: &[Triplet]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(triplets)?),
            OutputFormat::Table => {
                if triplets.is_empty() {
                    return Ok(self.colorize("No triplets found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Head", "Relation", "Tail"]);
                for t in triplets {
                    builder.push_record([t.head.as_str(), t.relation.as_str(), t.tail.as_str()]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(triplets.iter().map(format_triplet).collect::<Vec<_>>().join("\n")),
        }
    }

    /// Format placeholder rankings.
    pub fn format_resolutions(&self, claims: &[ClaimResolution]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(claims)?),
            OutputFormat::Table => {
                if claims.iter().all(|c| c.placeholders.is_empty()) {
                    return Ok(self.colorize("No placeholders to resolve.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Claim", "Placeholder", "Best", "Score", "Candidates"]);
                for claim in claims {
                    for p in &claim.placeholders {
                        let (best, score) = match p.candidates.first() {
                            Some(c) => (c.entity.clone(), format!("{:.3}", c.score)),
                            None => (self.colorize("unresolved", "red"), "-".to_string()),
                        };
                        builder.push_record([
                            claim.id.clone(),
                            p.placeholder.clone(),
                            best,
                            score,
                            p.candidates.len().to_string(),
                        ]);
                    }
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => {
                let mut lines = Vec::new();
                for claim in claims {
                    for p in &claim.placeholders {
                        let best = p.candidates.first().map(|c| c.entity.as_str()).unwrap_or("");
                        lines.push(format!("{}\t{}\t{}", claim.id, p.placeholder, best));
                    }
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a verification outcome.
    pub fn format_verification(&self, report: &VerificationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report.result.verdict.to_string()),
            OutputFormat::Table => {
                let verdict = report.result.verdict.to_string();
                let verdict = match verdict.as_str() {
                    "Supported" => self.colorize(&verdict, "green"),
                    "Refuted" => self.colorize(&verdict, "red"),
                    _ => self.colorize(&verdict, "yellow"),
                };

                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Claim".to_string(), report.claim.clone()]);
                if let Some(check) = report.graph_check {
                    builder.push_record(["Graph check".to_string(), check.to_string()]);
                }
                builder.push_record(["Evidence".to_string(), format!("{} triplets", report.evidence.len())]);
                builder.push_record(["Verdict".to_string(), verdict]);
                builder.push_record(["Explanation".to_string(), report.result.explanation.clone()]);
                Ok(self.render(builder))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
