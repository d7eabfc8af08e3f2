//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::settings::*;
use crate::coord::DegeneratePolicy;
use crate::output::OutputFields;

// =============================================================================
// t-SNE defaults
// =============================================================================

/// Default perplexity, suited to a table of about a thousand rows.
pub const DEFAULT_TSNE_PERPLEXITY: f64 = 15.0;

/// Default random seed for the initial layout.
pub const DEFAULT_TSNE_SEED: u64 = 42;

/// Default number of gradient descent iterations.
pub const DEFAULT_TSNE_MAX_ITER: usize = 1000;

// =============================================================================
// Output defaults
// =============================================================================

/// Default directory for generated artifacts.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "public";

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "embedsphere.log";

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = super::file::config_directory();

        Self {
            tsne: TsneSettings {
                perplexity: DEFAULT_TSNE_PERPLEXITY,
                seed: DEFAULT_TSNE_SEED,
                max_iter: DEFAULT_TSNE_MAX_ITER,
            },
            mapper: MapperSettings {
                degenerate: DegeneratePolicy::default(),
            },
            output: OutputSettings {
                directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
                fields: OutputFields::default(),
            },
            logging: LoggingSettings {
                file: config_dir.join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}
