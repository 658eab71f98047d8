//! `logharvest store` command handler

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use logharvest_aggregator::{Normalizer, collect_sources, store_normalized};
use logharvest_core::config::LogharvestConfig;
use logharvest_core::pipeline::{Clock, SystemClock};
use logharvest_core::types::SourceName;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `store` command.
///
/// Collects, normalizes and writes today's per-source log files, then
/// reports the written paths.
pub fn execute(config: &LogharvestConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let clock = SystemClock;
    let day = clock.now().format("%Y-%m-%d").to_string();

    let collected = collect_sources(&config.aggregator.sources);
    let normalizer = Normalizer::from_config(config)?;
    let normalized: BTreeMap<SourceName, Vec<String>> = collected
        .iter()
        .map(|(name, lines)| (name.clone(), normalizer.normalize_lines(lines)))
        .collect();

    let written = store_normalized(
        Path::new(&config.aggregator.output_dir),
        &day,
        &normalized,
    )?;
    info!(files = written.len(), %day, "stored daily logs");

    writer.render(&StoreReport { day, written })?;
    Ok(())
}

/// Store report.
#[derive(Serialize)]
pub struct StoreReport {
    /// Day the files were written for (`YYYY-MM-DD`)
    pub day: String,
    /// Written daily log file paths
    pub written: Vec<PathBuf>,
}

impl Render for StoreReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Stored {} file(s) for {}:", self.written.len(), self.day.bold())?;
        for path in &self.written {
            writeln!(w, "  {}", path.display())?;
        }
        Ok(())
    }
}
