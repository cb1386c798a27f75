//! Error types for siminv-loader

use thiserror::Error;

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Loader error type
///
/// Rejected rows and duplicate records are pipeline *values*
/// ([`crate::ingest::RowOutcome`], [`crate::db::records::InsertOutcome`]),
/// not errors. Only workbook access, store access and export failures are
/// fatal for a run.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Workbook cannot be opened or read
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// CSV export failure
    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    /// Shared siminv error (store access, configuration)
    #[error("Common error: {0}")]
    Common(#[from] siminv_common::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
