//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `reputation_check` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use reputation_check::initialization::init_logger_with;
use reputation_check::report::render_services;
use reputation_check::{run_check, Config, OutputFormat, ServiceRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if config.list_services {
        print!("{}", render_services(&ServiceRegistry::default()));
        return Ok(());
    }

    let output = config.output;
    match run_check(config).await {
        Ok(report) => {
            match output {
                OutputFormat::Table => print!("{}", report.render_table()),
                OutputFormat::Json => println!(
                    "{}",
                    report.to_json().context("Failed to serialize report")?
                ),
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
