//! Command-line configuration and shared constants.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Format used when a date/time cell is rendered as text in the destination.
///
/// Matches the `YYYY-MM-DD HH:MM:SS` rendering that downstream consumers of
/// the collection expect.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages and above (default).
    Info,
    /// Debug messages and above.
    Debug,
    /// Everything.
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored.
    Plain,
    /// One JSON object per line.
    Json,
}

/// Command-line options and configuration.
///
/// All five pipeline parameters are positional and order-sensitive, so the
/// tool can be driven from a workflow orchestrator with a fixed argument
/// template:
///
/// ```bash
/// xlsx2mongo ./export.xlsx mongodb://localhost:27017 mydb customers 500
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "xlsx2mongo",
    about = "Loads an Excel spreadsheet into a MongoDB collection in fixed-size batches, replacing the collection's contents."
)]
pub struct Config {
    /// Path to the source spreadsheet (.xlsx); the first sheet is read
    #[arg(value_parser)]
    pub file: PathBuf,

    /// MongoDB connection string
    pub mongo_uri: String,

    /// Target database name
    pub database: String,

    /// Target collection name; wiped before loading
    pub collection: String,

    /// Number of documents per bulk insert (must be positive)
    pub batch_size: NonZeroUsize,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}
