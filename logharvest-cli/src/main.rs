//! logharvest binary entry point

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::{CommandFactory, Parser};
use tracing::debug;

use logharvest_core::config::LogharvestConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // Bare invocation prints help and succeeds.
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = LogharvestConfig::load(&cli.config)?;
    logging::init_tracing(&config.general, cli.log_level.as_deref())?;
    debug!(config = %cli.config.display(), "configuration loaded");

    let writer = OutputWriter::new(cli.output);

    match command {
        Commands::Collect => commands::collect::execute(&config, &writer),
        Commands::Normalize => commands::normalize::execute(&config, &writer),
        Commands::Store => commands::store::execute(&config, &writer),
        Commands::Analyze => commands::analyze::execute(&config, &writer),
        Commands::Run(args) => commands::run::execute(&config, args, &writer),
    }
}
