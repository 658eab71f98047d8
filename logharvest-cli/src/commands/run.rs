//! `logharvest run` command handler

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use logharvest_aggregator::{GitPublisher, run_pipeline};
use logharvest_core::config::LogharvestConfig;
use logharvest_core::pipeline::SystemClock;
use logharvest_core::types::SummaryCounter;

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `run` command.
///
/// Runs the full pipeline and, with `--commit`, publishes the artifacts
/// via git. A failed publish is reported but never changes the exit code.
pub fn execute(
    config: &LogharvestConfig,
    args: RunArgs,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let publisher = args.commit.then(GitPublisher::new);
    let report = run_pipeline(
        &config.aggregator,
        &SystemClock,
        publisher
            .as_ref()
            .map(|p| p as &dyn logharvest_core::pipeline::ArtifactPublisher),
    )?;
    info!(day = %report.day, files = report.written.len(), "pipeline run finished");

    writer.render(&RunReport {
        day: report.day,
        sources: report.source_lines.len(),
        total_lines: report.source_lines.values().sum(),
        written: report.written,
        summary_path: report.summary_path,
        analysis: report.analysis,
        published: report.publish.map(|p| PublishSummary {
            ok: p.ok,
            detail: p.detail,
        }),
    })?;
    Ok(())
}

/// Publish outcome as shown to the user.
#[derive(Serialize)]
pub struct PublishSummary {
    pub ok: bool,
    pub detail: String,
}

/// Full pipeline run report.
#[derive(Serialize)]
pub struct RunReport {
    /// Run day (`YYYY-MM-DD`)
    pub day: String,
    /// Number of collected logical sources
    pub sources: usize,
    /// Total collected lines
    pub total_lines: usize,
    /// Written daily log file paths
    pub written: Vec<PathBuf>,
    /// Summary report path
    pub summary_path: PathBuf,
    /// Per-file severity counts
    pub analysis: BTreeMap<String, SummaryCounter>,
    /// Publish outcome, absent without `--commit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<PublishSummary>,
}

impl Render for RunReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Pipeline run for {}: {} source(s), {} line(s)",
            self.day.bold(),
            self.sources,
            self.total_lines
        )?;
        for path in &self.written {
            writeln!(w, "  wrote {}", path.display())?;
        }
        writeln!(w, "Summary:")?;
        for (file, counter) in &self.analysis {
            writeln!(w, "  {file}: {counter}")?;
        }
        writeln!(w, "Report written to {}", self.summary_path.display())?;

        if let Some(published) = &self.published {
            if published.ok {
                writeln!(w, "Published: {}", published.detail.green())?;
            } else {
                writeln!(w, "Publish failed: {}", published.detail.yellow())?;
            }
        }
        Ok(())
    }
}
