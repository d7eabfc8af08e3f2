//! t-SNE reducer configuration.

use super::defaults::{DEFAULT_TSNE_MAX_ITER, DEFAULT_TSNE_PERPLEXITY, DEFAULT_TSNE_SEED};

/// Configuration for the t-SNE dimensionality reducer.
///
/// The seed is part of the configuration so that a layout can be reproduced
/// exactly; the reducer never draws from a global random source.
///
/// # Example
///
/// ```
/// use embedsphere::config::TsneConfig;
///
/// let config = TsneConfig::default();
/// assert_eq!(config.perplexity(), 15.0);
/// assert_eq!(config.seed(), 42);
///
/// let config = TsneConfig::new()
///     .with_perplexity(30.0)
///     .with_seed(7)
///     .with_max_iter(500);
/// assert_eq!(config.max_iter(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TsneConfig {
    /// Effective number of neighbours considered per point
    perplexity: f64,
    /// Seed for the random initial layout
    seed: u64,
    /// Number of gradient descent iterations
    max_iter: usize,
}

impl TsneConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the perplexity. Default: 15.
    pub fn with_perplexity(mut self, perplexity: f64) -> Self {
        self.perplexity = perplexity;
        self
    }

    /// Set the random seed for the initial layout. Default: 42.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of optimisation iterations. Default: 1000.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn perplexity(&self) -> f64 {
        self.perplexity
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }
}

impl Default for TsneConfig {
    fn default() -> Self {
        Self {
            perplexity: DEFAULT_TSNE_PERPLEXITY,
            seed: DEFAULT_TSNE_SEED,
            max_iter: DEFAULT_TSNE_MAX_ITER,
        }
    }
}
