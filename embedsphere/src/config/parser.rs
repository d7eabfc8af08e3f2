//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! Starts from `ConfigFile::default()` and overlays every known key found in
//! the file. Values go through [`ConfigKey::set`], so the file and the
//! `config set` command share one set of validation rules. Unknown keys are
//! ignored with a warning.

use ini::Ini;

use super::file::ConfigFileError;
use super::keys::{ConfigKey, ConfigKeyError};
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    for key in ConfigKey::all() {
        let Some(section) = ini.section(Some(key.section())) else {
            continue;
        };
        let Some(value) = section.get(key.key_name()) else {
            continue;
        };
        // Empty values fall back to defaults
        if value.trim().is_empty() {
            continue;
        }

        key.set(&mut config, value).map_err(|e| {
            let reason = match e {
                ConfigKeyError::ValidationFailed { reason, .. } => reason,
                other => other.to_string(),
            };
            ConfigFileError::InvalidValue {
                section: key.section().to_string(),
                key: key.key_name().to_string(),
                value: value.to_string(),
                reason,
            }
        })?;
    }

    warn_unknown_keys(ini);
    Ok(config)
}

fn warn_unknown_keys(ini: &Ini) {
    for (section, properties) in ini.iter() {
        let section = section.unwrap_or("");
        for (key, _) in properties.iter() {
            let name = format!("{}.{}", section, key);
            if name.parse::<ConfigKey>().is_err() {
                tracing::warn!(key = %name, "Ignoring unknown configuration key");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::DegeneratePolicy;
    use crate::output::OutputFields;
    use std::path::PathBuf;

    fn parse(text: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(text).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_overlays_values() {
        let config = parse(
            "[tsne]\nperplexity = 30\nseed = 7\nmax_iter = 500\n\
             [mapper]\ndegenerate = reject\n\
             [output]\ndirectory = out\nfields = latlng\n",
        )
        .unwrap();

        assert_eq!(config.tsne.perplexity, 30.0);
        assert_eq!(config.tsne.seed, 7);
        assert_eq!(config.tsne.max_iter, 500);
        assert_eq!(config.mapper.degenerate, DegeneratePolicy::Reject);
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.output.fields, OutputFields::LatLng);
    }

    #[test]
    fn test_empty_value_keeps_default() {
        let config = parse("[tsne]\nseed =\n").unwrap();
        assert_eq!(config.tsne.seed, ConfigFile::default().tsne.seed);
    }

    #[test]
    fn test_invalid_value_reports_section_and_key() {
        let err = parse("[tsne]\nmax_iter = many\n").unwrap_err();
        match err {
            ConfigFileError::InvalidValue {
                section,
                key,
                value,
                reason,
            } => {
                assert_eq!(section, "tsne");
                assert_eq!(key, "max_iter");
                assert_eq!(value, "many");
                assert_eq!(reason, "must be a positive integer");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = parse(
            "[tsne]\nlearning_rate = 200\napprox_threshold = 0.5\n[extra]\nfoo = bar\n",
        )
        .unwrap();
        assert_eq!(config, ConfigFile::default());
    }
}
