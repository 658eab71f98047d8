//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's
//! derive macros. It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Logharvest -- log aggregation and normalization pipeline.
///
/// Use `logharvest <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "logharvest", version, about, long_about = None)]
pub struct Cli {
    /// Path to the aggregator.toml configuration file.
    #[arg(short, long, default_value = "aggregator.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enumerate configured sources and show per-source line counts.
    Collect,

    /// Collect and normalize, showing a preview of the normalized lines.
    Normalize,

    /// Collect, normalize and write daily per-source log files.
    Store,

    /// Analyze today's stored logs and write the severity summary report.
    Analyze,

    /// Run the full pipeline end to end.
    Run(RunArgs),
}

/// Run the full aggregation pipeline.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Stage and commit the produced artifacts with git.
    #[arg(long)]
    pub commit: bool,
}
