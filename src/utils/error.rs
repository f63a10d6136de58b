//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while turning an upload into a table.
///
/// Any of these means no table was built.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet parsing failed: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("Unsupported file type: {0} (expected csv or xlsx)")]
    UnsupportedFormat(String),

    #[error("Input is empty")]
    EmptyInput,

    #[error("Invalid table format: {0}")]
    InvalidFormat(String),
}

/// A query referenced a column the table does not have
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Errors raised while running one aggregation request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Limit must be at least 1")]
    InvalidLimit,

    #[error("{func} of {metric} for '{group}' is too large to represent")]
    NonFinite {
        func: String,
        metric: String,
        group: String,
    },
}

/// Errors raised by the dashboard session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No dataset loaded; upload a CSV or Excel file first")]
    NoDataset,

    #[error("Limit must be between 1 and {max}, got {limit}")]
    InvalidLimit { limit: usize, max: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No data to chart")]
    EmptyData,

    #[error("Chart unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
