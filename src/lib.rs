//! xlsx2mongo library: one-shot Excel-to-MongoDB batch loading
//!
//! This library reads the first sheet of an Excel workbook into memory, wipes
//! a MongoDB collection, and loads the rows into it in fixed-size bulk
//! inserts. It is intended for CLI or workflow-orchestrator use where the
//! destination collection is fully replaced on every run.
//!
//! # Example
//!
//! ```no_run
//! use xlsx2mongo::{run_migration, Config};
//! use clap::Parser;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::parse_from([
//!     "xlsx2mongo",
//!     "export.xlsx",
//!     "mongodb://localhost:27017",
//!     "mydb",
//!     "customers",
//!     "500",
//! ]);
//!
//! let report = run_migration(config).await?;
//! println!("Wrote {} documents in {} batches",
//!          report.total_rows, report.batches_written);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
mod excel;
pub mod initialization;
mod normalize;
mod storage;
mod table;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{InitializationError, MigrationError, ReadError};
pub use excel::read_table;
pub use normalize::normalize_dates;
pub use run::{run_migration, MigrationReport};
pub use table::{row_to_document, Cell, Table};

// Internal run module (contains the pipeline sequence)
mod run {
    use std::time::Instant;

    use log::info;

    use crate::config::Config;
    use crate::error_handling::MigrationError;
    use crate::{excel, normalize, storage};

    /// Results of a completed migration run.
    #[derive(Debug, Clone)]
    pub struct MigrationReport {
        /// Total number of rows read from the source sheet (== documents written)
        pub total_rows: usize,
        /// Number of bulk inserts performed
        pub batches_written: usize,
        /// Configured batch size
        pub batch_size: usize,
        /// Documents removed from the collection before loading
        pub deleted_count: u64,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the migration pipeline with the provided configuration.
    ///
    /// The stages run strictly in sequence: connect, clear the target
    /// collection, read the source sheet, normalize date columns, then write
    /// the rows in fixed-size bulk inserts. The first failing stage aborts
    /// the run and is named in the returned error.
    ///
    /// Note that the collection is cleared before the source file is read; a
    /// read failure therefore leaves the collection empty, and a write
    /// failure leaves it partially loaded. Neither case is rolled back.
    ///
    /// # Errors
    ///
    /// Returns a [`MigrationError`] variant identifying the failed stage:
    /// - the destination is unreachable or rejects the credentials
    /// - clearing the collection fails
    /// - the workbook is missing, corrupt, or has no header row
    /// - a bulk insert is rejected
    pub async fn run_migration(config: Config) -> Result<MigrationReport, MigrationError> {
        let start = Instant::now();

        let collection =
            storage::connect(&config.mongo_uri, &config.database, &config.collection).await?;

        println!(
            "Deleting all documents from collection {} in database {}.",
            config.collection, config.database
        );
        let deleted_count = storage::clear_collection(&collection).await?;
        info!("Removed {} pre-existing documents", deleted_count);
        println!("Collection cleared.");

        let mut table = excel::read_table(&config.file)?;
        normalize::normalize_dates(&mut table);

        let batch_size = config.batch_size.get();
        let total_rows = table.len();
        println!(
            "Processing {} rows in {} batches of {} rows each.",
            total_rows,
            table.num_batches(batch_size),
            batch_size
        );

        let batches_written = storage::insert_batches(&collection, &table, batch_size).await?;

        Ok(MigrationReport {
            total_rows,
            batches_written,
            batch_size,
            deleted_count,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }
}
