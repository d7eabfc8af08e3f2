//! Dimensionality reduction.
//!
//! The [`Reducer`] trait is the seam between the pipeline and whichever
//! algorithm projects the N×D embedding matrix down to N 2D points.
//! [`TsneReducer`] is the production implementation, backed by `linfa-tsne`.

mod tsne;

pub use tsne::TsneReducer;

use crate::coord::Point2D;
use ndarray::ArrayView2;
use thiserror::Error;

/// Errors raised by a reducer.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// Too few rows to build a layout
    #[error("need at least {required} rows to reduce, got {found}")]
    NotEnoughRows { required: usize, found: usize },

    /// Perplexity is not usable for the number of rows
    #[error("perplexity {perplexity} is invalid for {rows} rows (requires 0 < 3 * perplexity < rows - 1)")]
    InvalidPerplexity { perplexity: f64, rows: usize },

    /// The input matrix contains NaN or infinite values
    #[error("embedding matrix contains non-finite values at row {row}")]
    NonFinite { row: usize },

    /// The t-SNE backend failed
    #[error("t-SNE failed: {0}")]
    Tsne(#[from] linfa_tsne::TSneError),

    /// The backend returned a layout of the wrong shape
    #[error("reducer returned a {rows}x{cols} layout, expected {expected}x2")]
    BadLayout {
        rows: usize,
        cols: usize,
        expected: usize,
    },
}

/// Projects a high-dimensional matrix to one 2D point per row.
///
/// Implementations must be deterministic for a fixed configuration and must
/// return exactly one point per input row, in row order.
pub trait Reducer {
    /// Human-readable algorithm name for logs.
    fn name(&self) -> &str;

    /// Reduce an N×D matrix to N points.
    fn reduce(&self, matrix: ArrayView2<'_, f64>) -> Result<Vec<Point2D>, ReduceError>;
}

impl<R: Reducer + ?Sized> Reducer for &R {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn reduce(&self, matrix: ArrayView2<'_, f64>) -> Result<Vec<Point2D>, ReduceError> {
        (**self).reduce(matrix)
    }
}

impl<R: Reducer + ?Sized> Reducer for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn reduce(&self, matrix: ArrayView2<'_, f64>) -> Result<Vec<Point2D>, ReduceError> {
        (**self).reduce(matrix)
    }
}
