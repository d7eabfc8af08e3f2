//! Errors raised while loading an embedding table.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The CSV file could not be opened
    #[error("failed to open '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV (bad quoting, ragged rows, invalid UTF-8)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// An embedding cell could not be parsed as a list of numbers
    #[error("row {row}: invalid embedding vector: {reason}")]
    InvalidVector { row: usize, reason: String },

    /// Rows carry vectors of different lengths
    #[error("row {row}: embedding has {found} components, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The table has no data rows
    #[error("embedding table has no rows")]
    Empty,

    #[error("cannot build embedding matrix: {0}")]
    Shape(String),
}
