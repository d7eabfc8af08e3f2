//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use super::tsne::TsneConfig;
use crate::coord::DegeneratePolicy;
use crate::output::OutputFields;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// t-SNE reducer settings
    pub tsne: TsneSettings,
    /// Coordinate mapper settings
    pub mapper: MapperSettings,
    /// Artifact output settings
    pub output: OutputSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// t-SNE configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TsneSettings {
    /// Perplexity (effective neighbour count)
    pub perplexity: f64,
    /// Seed for the random initial layout
    pub seed: u64,
    /// Gradient descent iterations
    pub max_iter: usize,
}

impl TsneSettings {
    /// Build the reducer configuration from these settings.
    pub fn to_config(&self) -> TsneConfig {
        TsneConfig::new()
            .with_perplexity(self.perplexity)
            .with_seed(self.seed)
            .with_max_iter(self.max_iter)
    }
}

/// Coordinate mapper configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MapperSettings {
    /// Behaviour when every point has the same radius
    pub degenerate: DegeneratePolicy,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    /// Directory that receives generated JSON files
    pub directory: PathBuf,
    /// Placement fields written to globe records
    pub fields: OutputFields,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
