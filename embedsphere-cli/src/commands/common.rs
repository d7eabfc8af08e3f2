//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use std::path::PathBuf;

use embedsphere::config::config_file_path;
use embedsphere::coord::DegeneratePolicy;
use embedsphere::output::OutputFields;

/// Degenerate layout policy selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum DegenerateArg {
    /// Place every point at the north pole, keeping its longitude
    Collapse,
    /// Fail when all points lie at the same radius
    Reject,
}

impl From<DegenerateArg> for DegeneratePolicy {
    fn from(arg: DegenerateArg) -> Self {
        match arg {
            DegenerateArg::Collapse => DegeneratePolicy::Collapse,
            DegenerateArg::Reject => DegeneratePolicy::Reject,
        }
    }
}

/// Globe record field selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum FieldsArg {
    /// theta, phi, lat and lng
    Full,
    /// lat and lng only
    Latlng,
}

impl From<FieldsArg> for OutputFields {
    fn from(arg: FieldsArg) -> Self {
        match arg {
            FieldsArg::Full => OutputFields::Full,
            FieldsArg::Latlng => OutputFields::LatLng,
        }
    }
}

/// Resolve the config file path from the global `--config` flag.
pub fn resolve_config_path(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(config_file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_arg_conversion() {
        assert_eq!(
            DegeneratePolicy::from(DegenerateArg::Collapse),
            DegeneratePolicy::Collapse
        );
        assert_eq!(
            DegeneratePolicy::from(DegenerateArg::Reject),
            DegeneratePolicy::Reject
        );
    }

    #[test]
    fn test_fields_arg_conversion() {
        assert_eq!(OutputFields::from(FieldsArg::Full), OutputFields::Full);
        assert_eq!(OutputFields::from(FieldsArg::Latlng), OutputFields::LatLng);
    }

    #[test]
    fn test_resolve_config_path() {
        let custom = PathBuf::from("/tmp/custom.ini");
        assert_eq!(resolve_config_path(Some(custom.clone())), custom);
        assert_eq!(resolve_config_path(None), config_file_path());
    }
}
