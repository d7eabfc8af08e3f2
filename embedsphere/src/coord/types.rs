//! Coordinate type definitions

use std::fmt;
use std::str::FromStr;

/// Geographic latitude range in whole degrees
pub const MIN_LAT: i32 = -90;
pub const MAX_LAT: i32 = 90;

/// Geographic longitude range in whole degrees
pub const MIN_LNG: i32 = -180;
pub const MAX_LNG: i32 = 180;

/// Relative tolerance under which the radius span of a batch counts as zero.
pub const RADIUS_EPSILON: f64 = 1e-12;

/// A point of the 2D embedding layout.
///
/// One point per input row; the order of a `Point2D` slice is the row order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the origin.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Azimuthal angle around the origin, in (-π, π].
    #[inline]
    pub fn azimuth(&self) -> f64 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Spherical angles in radians.
///
/// `theta` is the polar angle measured from the north pole, `phi` the
/// azimuthal angle as returned by the four-quadrant arctangent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalAngle {
    /// Polar angle, 0 (north pole) to π (south pole)
    pub theta: f64,
    /// Azimuthal angle, (-π, π]
    pub phi: f64,
}

impl SphericalAngle {
    #[inline]
    pub fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }

    /// True for the (0, 0) angle, which downstream consumers treat as "unplaced".
    #[inline]
    pub fn is_origin(&self) -> bool {
        self.theta == 0.0 && self.phi == 0.0
    }
}

/// Whole-degree geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeoCoordinate {
    /// Latitude, -90 (south) to 90 (north)
    pub lat: i32,
    /// Longitude, -180 to 180
    pub lng: i32,
}

impl GeoCoordinate {
    /// Key used by the similarity index, e.g. `"45,-120"`.
    pub fn index_key(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// What to do when every point of a batch lies at the same radius.
///
/// Radius normalization divides by `max - min`, which is zero for such a
/// batch (a single point always hits this case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Place every point at theta = 0, keeping its azimuth.
    #[default]
    Collapse,
    /// Fail with [`CoordError::DegenerateInput`].
    Reject,
}

impl DegeneratePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegeneratePolicy::Collapse => "collapse",
            DegeneratePolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for DegeneratePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DegeneratePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "collapse" => Ok(DegeneratePolicy::Collapse),
            "reject" => Ok(DegeneratePolicy::Reject),
            other => Err(format!(
                "unknown degenerate policy '{}' (expected 'collapse' or 'reject')",
                other
            )),
        }
    }
}

/// Errors that can occur during coordinate mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// No points were supplied
    EmptyInput,
    /// All points share the same radius and the policy is `Reject`
    DegenerateInput { radius: f64 },
    /// Theta and phi sequences differ in length
    LengthMismatch { theta: usize, phi: usize },
    /// A point has a NaN or infinite component
    NonFinitePoint { index: usize },
    /// A theta or phi value is NaN or infinite
    NonFiniteAngle { index: usize },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::EmptyInput => {
                write!(f, "No points to map (at least one point is required)")
            }
            CoordError::DegenerateInput { radius } => {
                write!(
                    f,
                    "All points lie at the same radius ({}), radius normalization is undefined",
                    radius
                )
            }
            CoordError::LengthMismatch { theta, phi } => {
                write!(
                    f,
                    "Angle sequences differ in length: {} theta values, {} phi values",
                    theta, phi
                )
            }
            CoordError::NonFinitePoint { index } => {
                write!(f, "Point {} has a non-finite coordinate", index)
            }
            CoordError::NonFiniteAngle { index } => {
                write!(f, "Angle {} is not a finite number", index)
            }
        }
    }
}

impl std::error::Error for CoordError {}
