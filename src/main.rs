//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `xlsx2mongo` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All pipeline functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use xlsx2mongo::initialization::init_logger_with;
use xlsx2mongo::{run_migration, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config; clap prints usage and exits
    // non-zero when the five positional parameters are not all present
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Run the migration using the library
    match run_migration(config).await {
        Ok(report) => {
            println!(
                "Migration complete: {} document{} written in {} batch{} ({:.1}s).",
                report.total_rows,
                if report.total_rows == 1 { "" } else { "s" },
                report.batches_written,
                if report.batches_written == 1 { "" } else { "es" },
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            // MigrationError messages already embed their source errors
            eprintln!("xlsx2mongo error: {}", e);
            process::exit(1);
        }
    }
}
