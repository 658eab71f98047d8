//! `logharvest collect` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use logharvest_aggregator::collect_sources;
use logharvest_core::config::LogharvestConfig;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `collect` command.
///
/// Enumerates the configured sources and reports how many lines each
/// logical source contributes, without writing anything.
pub fn execute(config: &LogharvestConfig, writer: &OutputWriter) -> Result<(), CliError> {
    info!(sources = config.aggregator.sources.len(), "collecting sources");

    let collected = collect_sources(&config.aggregator.sources);

    let report = CollectReport {
        configured_specs: config.aggregator.sources.clone(),
        sources: collected
            .iter()
            .map(|(name, lines)| SourceLines {
                name: name.to_string(),
                lines: lines.len(),
            })
            .collect(),
        total_lines: collected.values().map(Vec::len).sum(),
    };

    writer.render(&report)?;
    Ok(())
}

/// Per-source line count.
#[derive(Serialize)]
pub struct SourceLines {
    pub name: String,
    pub lines: usize,
}

/// Collection report.
#[derive(Serialize)]
pub struct CollectReport {
    /// Source specs as configured (paths, globs, directories)
    pub configured_specs: Vec<String>,
    /// Resolved logical sources with line counts
    pub sources: Vec<SourceLines>,
    /// Total lines across all sources
    pub total_lines: usize,
}

impl Render for CollectReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Collected {} source(s):", self.sources.len())?;
        for source in &self.sources {
            writeln!(w, "  {}: {} line(s)", source.name.bold(), source.lines)?;
        }
        writeln!(w, "Total: {} line(s)", self.total_lines)?;
        Ok(())
    }
}
