//! t-SNE reducer backed by `linfa-tsne`.

use linfa::traits::Transformer;
use linfa::ParamGuard;
use linfa_tsne::TSneParams;
use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info};

use super::{ReduceError, Reducer};
use crate::config::TsneConfig;
use crate::coord::Point2D;

/// Output dimensionality of the layout.
const EMBEDDING_SIZE: usize = 2;

/// Barnes-Hut threshold that selects exact gradients.
///
/// Any positive threshold builds a vantage-point tree whose pivots come from
/// the thread-local RNG, so only the exact path is reproducible from a seed.
const EXACT_THRESHOLD: f64 = 0.0;

/// Exact t-SNE with a seeded random initial layout.
#[derive(Debug, Clone)]
pub struct TsneReducer {
    config: TsneConfig,
}

impl TsneReducer {
    pub fn new(config: TsneConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TsneConfig {
        &self.config
    }

    fn validate(&self, matrix: &ArrayView2<'_, f64>) -> Result<(), ReduceError> {
        let rows = matrix.nrows();
        if rows < 2 {
            return Err(ReduceError::NotEnoughRows {
                required: 2,
                found: rows,
            });
        }

        let perplexity = self.config.perplexity();
        if !perplexity.is_finite()
            || perplexity <= 0.0
            || 3.0 * perplexity >= (rows - 1) as f64
        {
            return Err(ReduceError::InvalidPerplexity { perplexity, rows });
        }

        if let Some(row) = matrix
            .outer_iter()
            .position(|r| r.iter().any(|v| !v.is_finite()))
        {
            return Err(ReduceError::NonFinite { row });
        }

        Ok(())
    }
}

impl Reducer for TsneReducer {
    fn name(&self) -> &str {
        "t-SNE"
    }

    fn reduce(&self, matrix: ArrayView2<'_, f64>) -> Result<Vec<Point2D>, ReduceError> {
        self.validate(&matrix)?;

        let (rows, cols) = matrix.dim();
        info!(
            rows,
            cols,
            perplexity = self.config.perplexity(),
            seed = self.config.seed(),
            max_iter = self.config.max_iter(),
            "Fitting t-SNE layout"
        );
        let start = Instant::now();

        let rng = StdRng::seed_from_u64(self.config.seed());
        let layout = TSneParams::embedding_size_with_rng(EMBEDDING_SIZE, rng)
            .perplexity(self.config.perplexity())
            .approx_threshold(EXACT_THRESHOLD)
            .max_iter(self.config.max_iter())
            .check()?
            .transform(matrix.to_owned())?;

        if layout.dim() != (rows, EMBEDDING_SIZE) {
            return Err(ReduceError::BadLayout {
                rows: layout.nrows(),
                cols: layout.ncols(),
                expected: rows,
            });
        }

        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "t-SNE layout complete");

        Ok(layout
            .outer_iter()
            .map(|row| Point2D::new(row[0], row[1]))
            .collect())
    }
}
