//! Which placement fields the globe records carry.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFields {
    /// `theta`, `phi`, `lat` and `lng`
    #[default]
    Full,
    /// `lat` and `lng` only
    LatLng,
}

impl OutputFields {
    pub fn includes_angles(&self) -> bool {
        matches!(self, OutputFields::Full)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFields::Full => "full",
            OutputFields::LatLng => "latlng",
        }
    }
}

impl fmt::Display for OutputFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFields {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(OutputFields::Full),
            "latlng" | "lat_lng" => Ok(OutputFields::LatLng),
            other => Err(format!(
                "unknown output fields '{}' (expected 'full' or 'latlng')",
                other
            )),
        }
    }
}
