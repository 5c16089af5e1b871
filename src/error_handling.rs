use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors raised while reading the source spreadsheet.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The workbook could not be opened or a sheet could not be parsed.
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    /// The workbook contains no sheets at all.
    #[error("Workbook has no sheets")]
    NoSheet,

    /// The first sheet has no header row to derive column names from.
    #[error("Sheet {0:?} has no header row")]
    EmptySheet(String),
}

/// Pipeline errors, tagged with the stage that failed.
///
/// The pipeline stops at the first failure; the variant tells the operator
/// which stage to look at. `Write` additionally records how many batches were
/// already committed, because earlier bulk inserts are not rolled back.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// The destination server could not be reached or authenticated against.
    #[error("Failed to connect to MongoDB: {0}")]
    Connect(#[source] mongodb::error::Error),

    /// Clearing the target collection failed.
    #[error("Failed to clear collection: {0}")]
    Reset(#[source] mongodb::error::Error),

    /// The source spreadsheet could not be read.
    #[error("Failed to read spreadsheet: {0}")]
    Read(#[from] ReadError),

    /// A bulk insert was rejected. Batches written before the failure remain
    /// committed; the destination is left partially migrated.
    #[error("Bulk insert failed after {batches_written} committed batches: {source}")]
    Write {
        /// Number of batches successfully written before the failure.
        batches_written: usize,
        /// The underlying driver error.
        #[source]
        source: mongodb::error::Error,
    },
}
