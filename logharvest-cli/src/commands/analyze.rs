//! `logharvest analyze` command handler

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use logharvest_aggregator::{analyze_files, stored_daily_logs, write_summary};
use logharvest_core::config::LogharvestConfig;
use logharvest_core::pipeline::{Clock, SystemClock};
use logharvest_core::types::SummaryCounter;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `analyze` command.
///
/// Analyzes today's already-stored log files in the output directory and
/// writes the severity summary report. Running it before `store` simply
/// produces an empty summary.
pub fn execute(config: &LogharvestConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let clock = SystemClock;
    let day = clock.now().format("%Y-%m-%d").to_string();

    let stored = stored_daily_logs(Path::new(&config.aggregator.output_dir), &day)?;
    let analysis = analyze_files(&stored);
    let summary_path = write_summary(Path::new(&config.aggregator.report_dir), &day, &analysis)?;
    info!(files = analysis.len(), summary = %summary_path.display(), "analysis complete");

    writer.render(&AnalyzeReport {
        day,
        summary_path,
        analysis,
    })?;
    Ok(())
}

/// Analysis report.
#[derive(Serialize)]
pub struct AnalyzeReport {
    /// Analyzed day (`YYYY-MM-DD`)
    pub day: String,
    /// Written summary report path
    pub summary_path: PathBuf,
    /// Per-file severity counts
    pub analysis: BTreeMap<String, SummaryCounter>,
}

impl Render for AnalyzeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "{} Summary:", self.day.bold())?;
        for (file, counter) in &self.analysis {
            writeln!(w, "  {file}: {counter}")?;
        }
        if self.analysis.is_empty() {
            writeln!(w, "  (no stored logs for today)")?;
        }
        writeln!(w, "Report written to {}", self.summary_path.display())?;
        Ok(())
    }
}
