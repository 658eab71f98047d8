//! `logharvest normalize` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use logharvest_aggregator::{Normalizer, collect_sources};
use logharvest_core::config::LogharvestConfig;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Preview lines shown per source in text output.
const PREVIEW_LINES: usize = 3;

/// Execute the `normalize` command.
///
/// Collects and normalizes all sources, then shows per-source counts and
/// a short preview of the normalized lines. Nothing is written to disk.
pub fn execute(config: &LogharvestConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let collected = collect_sources(&config.aggregator.sources);
    let normalizer = Normalizer::from_config(config)?;

    let sources: Vec<NormalizedSource> = collected
        .iter()
        .map(|(name, lines)| {
            let normalized = normalizer.normalize_lines(lines);
            NormalizedSource {
                name: name.to_string(),
                lines: normalized.len(),
                preview: normalized.iter().take(PREVIEW_LINES).cloned().collect(),
            }
        })
        .collect();

    info!(sources = sources.len(), "normalized sources");

    writer.render(&NormalizeReport { sources })?;
    Ok(())
}

/// One normalized source with a preview of its first lines.
#[derive(Serialize)]
pub struct NormalizedSource {
    pub name: String,
    pub lines: usize,
    pub preview: Vec<String>,
}

/// Normalization report.
#[derive(Serialize)]
pub struct NormalizeReport {
    pub sources: Vec<NormalizedSource>,
}

impl Render for NormalizeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for source in &self.sources {
            writeln!(w, "{} ({} line(s)):", source.name.bold(), source.lines)?;
            for line in &source.preview {
                writeln!(w, "  {line}")?;
            }
            if source.lines > source.preview.len() {
                writeln!(w, "  ... {} more", source.lines - source.preview.len())?;
            }
        }
        if self.sources.is_empty() {
            writeln!(w, "No sources collected.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_report_previews_and_truncates() {
        let report = NormalizeReport {
            sources: vec![NormalizedSource {
                name: "app".to_owned(),
                lines: 5,
                preview: vec![
                    "2026-01-15T10:00:00Z INFO one".to_owned(),
                    "2026-01-15T10:00:01Z WARN two".to_owned(),
                    "2026-01-15T10:00:02Z ERROR three".to_owned(),
                ],
            }],
        };

        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("render should succeed");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("app (5 line(s)):"));
        assert!(output.contains("INFO one"));
        assert!(output.contains("... 2 more"));
    }

    #[test]
    fn test_normalize_report_empty() {
        let report = NormalizeReport { sources: Vec::new() };
        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("render should succeed");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("No sources collected."));
    }
}
