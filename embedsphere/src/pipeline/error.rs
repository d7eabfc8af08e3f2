//! Error types for the generate pipeline.

use thiserror::Error;

use crate::coord::CoordError;
use crate::embedding::EmbeddingError;
use crate::output::OutputError;
use crate::reduce::ReduceError;
use crate::similarity::SimilarityError;

/// Errors that can occur while running a pipeline step.
///
/// Each variant wraps the error of the stage that failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading or validating the embedding table failed
    #[error("embedding source: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Dimensionality reduction failed
    #[error("reduction: {0}")]
    Reduce(#[from] ReduceError),

    /// Spherical mapping failed
    #[error("coordinate mapping: {0}")]
    Coord(#[from] CoordError),

    /// Writing or reading an artifact failed
    #[error("output: {0}")]
    Output(#[from] OutputError),

    /// Similarity scoring failed
    #[error("similarity: {0}")]
    Similarity(#[from] SimilarityError),

    /// The reducer returned the wrong number of points
    #[error("{reducer} returned {found} points for {expected} rows")]
    LayoutLength {
        reducer: String,
        expected: usize,
        found: usize,
    },

    /// A globe record has no usable embedding
    #[error("record {row} has no parseable embedding")]
    MissingEmbedding { row: usize },
}
