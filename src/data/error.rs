use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a catalog from a source file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("{}: missing required column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// `row` counts data rows from 1; the header line is not included.
    #[error("data row {row}: invalid {column} value '{value}'")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("malformed source: {0}")]
    Malformed(String),
}
