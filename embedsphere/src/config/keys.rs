//! Configuration key access and validation.
//!
//! Provides a type-safe interface for getting and setting configuration
//! values by `section.key` name. The INI parser uses the same setters, so a
//! value accepted by `config set` is exactly a value accepted in the file.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use super::settings::ConfigFile;
use crate::coord::DegeneratePolicy;
use crate::output::OutputFields;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
///
/// Each key maps to a specific field in [`ConfigFile`] and knows how to
/// get and set its value with proper validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    // t-SNE settings
    TsnePerplexity,
    TsneSeed,
    TsneMaxIter,

    // Mapper settings
    MapperDegenerate,

    // Output settings
    OutputDirectory,
    OutputFields,

    // Logging settings
    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == lower)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "tsne.perplexity").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::TsnePerplexity => "tsne.perplexity",
            ConfigKey::TsneSeed => "tsne.seed",
            ConfigKey::TsneMaxIter => "tsne.max_iter",
            ConfigKey::MapperDegenerate => "mapper.degenerate",
            ConfigKey::OutputDirectory => "output.directory",
            ConfigKey::OutputFields => "output.fields",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "tsne").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "perplexity").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::TsnePerplexity => config.tsne.perplexity.to_string(),
            ConfigKey::TsneSeed => config.tsne.seed.to_string(),
            ConfigKey::TsneMaxIter => config.tsne.max_iter.to_string(),
            ConfigKey::MapperDegenerate => config.mapper.degenerate.to_string(),
            ConfigKey::OutputDirectory => path_to_display(&config.output.directory),
            ConfigKey::OutputFields => config.output.fields.to_string(),
            ConfigKey::LoggingFile => path_to_display(&config.logging.file),
        }
    }

    /// Set a value on a config file.
    ///
    /// The value is parsed and validated first; on error the config is left
    /// unchanged.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        let value = value.trim();
        match self {
            ConfigKey::TsnePerplexity => {
                config.tsne.perplexity = self.parse_with(value, positive_number)?;
            }
            ConfigKey::TsneSeed => {
                config.tsne.seed = self.parse_with(value, |v| {
                    v.parse::<u64>()
                        .map_err(|_| "must be a non-negative integer".to_string())
                })?;
            }
            ConfigKey::TsneMaxIter => {
                config.tsne.max_iter = self.parse_with(value, positive_integer)?;
            }
            ConfigKey::MapperDegenerate => {
                config.mapper.degenerate = self.parse_with(value, DegeneratePolicy::from_str)?;
            }
            ConfigKey::OutputDirectory => {
                config.output.directory = self.parse_with(value, non_empty_path)?;
            }
            ConfigKey::OutputFields => {
                config.output.fields = self.parse_with(value, OutputFields::from_str)?;
            }
            ConfigKey::LoggingFile => {
                config.logging.file = self.parse_with(value, non_empty_path)?;
            }
        }
        Ok(())
    }

    /// Validate a value without applying it.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        let mut scratch = ConfigFile::default();
        self.set(&mut scratch, value)
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::TsnePerplexity,
            ConfigKey::TsneSeed,
            ConfigKey::TsneMaxIter,
            ConfigKey::MapperDegenerate,
            ConfigKey::OutputDirectory,
            ConfigKey::OutputFields,
            ConfigKey::LoggingFile,
        ]
    }

    fn parse_with<T>(
        &self,
        value: &str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Result<T, ConfigKeyError> {
        parse(value).map_err(|reason| ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason,
        })
    }
}

// ============================================================================
// Value parsers
// ============================================================================

fn positive_number(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err("must be a positive number".to_string()),
    }
}

fn positive_integer(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err("must be a positive integer".to_string()),
    }
}

fn non_empty_path(value: &str) -> Result<PathBuf, String> {
    if value.is_empty() {
        Err("must be a valid path".to_string())
    } else {
        Ok(expand_tilde(value))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Convert path to display string, collapsing home dir to ~.
pub(super) fn path_to_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_parsing() {
        assert_eq!(
            "tsne.perplexity".parse::<ConfigKey>().unwrap(),
            ConfigKey::TsnePerplexity
        );
        assert_eq!(
            "mapper.degenerate".parse::<ConfigKey>().unwrap(),
            ConfigKey::MapperDegenerate
        );
        // Case insensitive
        assert_eq!(
            "OUTPUT.FIELDS".parse::<ConfigKey>().unwrap(),
            ConfigKey::OutputFields
        );
        assert_eq!(
            "invalid.key".parse::<ConfigKey>().unwrap_err(),
            ConfigKeyError::UnknownKey("invalid.key".to_string())
        );
    }

    #[test]
    fn test_key_name_parts() {
        assert_eq!(ConfigKey::TsneMaxIter.section(), "tsne");
        assert_eq!(ConfigKey::TsneMaxIter.key_name(), "max_iter");
        assert_eq!(ConfigKey::LoggingFile.section(), "logging");
        assert_eq!(ConfigKey::LoggingFile.key_name(), "file");
    }

    #[test]
    fn test_every_key_round_trips_its_name() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
    }

    #[test]
    fn test_get_value() {
        let config = ConfigFile::default();

        assert_eq!(ConfigKey::TsnePerplexity.get(&config), "15");
        assert_eq!(ConfigKey::TsneSeed.get(&config), "42");
        assert_eq!(ConfigKey::TsneMaxIter.get(&config), "1000");
        assert_eq!(ConfigKey::MapperDegenerate.get(&config), "collapse");
        assert_eq!(ConfigKey::OutputFields.get(&config), "full");
        assert_eq!(ConfigKey::OutputDirectory.get(&config), "public");
    }

    #[test]
    fn test_set_value() {
        let mut config = ConfigFile::default();

        ConfigKey::TsnePerplexity.set(&mut config, "30").unwrap();
        assert_eq!(config.tsne.perplexity, 30.0);

        ConfigKey::TsneSeed.set(&mut config, "7").unwrap();
        assert_eq!(config.tsne.seed, 7);

        ConfigKey::MapperDegenerate.set(&mut config, "reject").unwrap();
        assert_eq!(config.mapper.degenerate, DegeneratePolicy::Reject);

        ConfigKey::OutputFields.set(&mut config, "latlng").unwrap();
        assert_eq!(config.output.fields, OutputFields::LatLng);

        ConfigKey::OutputDirectory.set(&mut config, "out/globe").unwrap();
        assert_eq!(config.output.directory, PathBuf::from("out/globe"));
    }

    #[test]
    fn test_invalid_value_leaves_config_unchanged() {
        let mut config = ConfigFile::default();

        let err = ConfigKey::TsneMaxIter.set(&mut config, "0").unwrap_err();
        assert!(matches!(err, ConfigKeyError::ValidationFailed { .. }));
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_validate_numbers() {
        assert!(ConfigKey::TsnePerplexity.validate("5.5").is_ok());
        assert!(ConfigKey::TsnePerplexity.validate("0").is_err());
        assert!(ConfigKey::TsnePerplexity.validate("-3").is_err());
        assert!(ConfigKey::TsnePerplexity.validate("NaN").is_err());
        assert!(ConfigKey::TsneSeed.validate("0").is_ok());
        assert!(ConfigKey::TsneSeed.validate("-1").is_err());
    }

    #[test]
    fn test_validate_choices_and_paths() {
        assert!(ConfigKey::MapperDegenerate.validate("COLLAPSE").is_ok());
        assert!(ConfigKey::MapperDegenerate.validate("ignore").is_err());
        assert!(ConfigKey::OutputFields.validate("full").is_ok());
        assert!(ConfigKey::OutputFields.validate("xyz").is_err());
        assert!(ConfigKey::LoggingFile.validate("").is_err());
        assert!(ConfigKey::LoggingFile.validate("logs/app.log").is_ok());
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/data"), home.join("data"));
        }
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }
}
