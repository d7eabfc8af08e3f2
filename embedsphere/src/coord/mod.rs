//! Coordinate mapping module
//!
//! Maps a 2D embedding layout onto a sphere: each point's azimuth becomes
//! `phi`, its distance from the origin (normalized over the batch) becomes
//! the polar angle `theta`, and the angles are then converted to whole-degree
//! latitude/longitude.

mod types;

pub use types::{
    CoordError, DegeneratePolicy, GeoCoordinate, Point2D, SphericalAngle, MAX_LAT, MAX_LNG,
    MIN_LAT, MIN_LNG, RADIUS_EPSILON,
};

use std::f64::consts::PI;

/// Maps 2D points to spherical angles, collapsing degenerate batches.
///
/// Equivalent to [`to_unit_sphere_with`] using [`DegeneratePolicy::Collapse`].
///
/// # Errors
///
/// Returns [`CoordError::EmptyInput`] for an empty slice and
/// [`CoordError::NonFinitePoint`] if any coordinate is NaN or infinite.
#[inline]
pub fn to_unit_sphere(points: &[Point2D]) -> Result<Vec<SphericalAngle>, CoordError> {
    to_unit_sphere_with(points, DegeneratePolicy::Collapse)
}

/// Maps 2D points to spherical angles.
///
/// # Arguments
///
/// * `points` - The 2D layout, one point per row
/// * `policy` - Behaviour when all points share the same radius
///
/// # Returns
///
/// One [`SphericalAngle`] per input point, in input order. The point with
/// the smallest radius gets `theta = 0`, the largest `theta = π`.
pub fn to_unit_sphere_with(
    points: &[Point2D],
    policy: DegeneratePolicy,
) -> Result<Vec<SphericalAngle>, CoordError> {
    if points.is_empty() {
        return Err(CoordError::EmptyInput);
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(CoordError::NonFinitePoint { index });
    }

    let radii: Vec<f64> = points.iter().map(Point2D::radius).collect();
    let (min_radius, max_radius) = radii
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
            (lo.min(r), hi.max(r))
        });
    let span = max_radius - min_radius;

    if span <= RADIUS_EPSILON * max_radius {
        return match policy {
            DegeneratePolicy::Collapse => {
                tracing::debug!(
                    points = points.len(),
                    radius = max_radius,
                    "All points share one radius, collapsing theta to 0"
                );
                Ok(points
                    .iter()
                    .map(|p| SphericalAngle::new(0.0, p.azimuth()))
                    .collect())
            }
            DegeneratePolicy::Reject => Err(CoordError::DegenerateInput { radius: max_radius }),
        };
    }

    Ok(points
        .iter()
        .zip(&radii)
        .map(|(point, &radius)| {
            let normalized = (radius - min_radius) / span;
            SphericalAngle::new(PI * normalized, point.azimuth())
        })
        .collect())
}

/// Converts paired theta/phi sequences (radians) to latitude/longitude.
///
/// `lat = 90 - degrees(theta)`, `lng = degrees(phi)`, both rounded to the
/// nearest whole degree (halfway cases away from zero) and clamped to the
/// valid geographic range.
///
/// # Errors
///
/// Returns [`CoordError::LengthMismatch`] when the slices differ in length and
/// [`CoordError::NonFiniteAngle`] for NaN or infinite angles.
pub fn to_lat_lng(theta: &[f64], phi: &[f64]) -> Result<Vec<GeoCoordinate>, CoordError> {
    if theta.len() != phi.len() {
        return Err(CoordError::LengthMismatch {
            theta: theta.len(),
            phi: phi.len(),
        });
    }
    if let Some(index) = theta
        .iter()
        .zip(phi)
        .position(|(t, p)| !t.is_finite() || !p.is_finite())
    {
        return Err(CoordError::NonFiniteAngle { index });
    }

    Ok(theta
        .iter()
        .zip(phi)
        .map(|(&t, &p)| angle_to_geo(t, p))
        .collect())
}

/// Converts spherical angles to latitude/longitude.
///
/// Same conversion as [`to_lat_lng`] for an already-paired slice.
pub fn to_geo_coordinates(angles: &[SphericalAngle]) -> Result<Vec<GeoCoordinate>, CoordError> {
    let (theta, phi): (Vec<f64>, Vec<f64>) = angles.iter().map(|a| (a.theta, a.phi)).unzip();
    to_lat_lng(&theta, &phi)
}

#[inline]
fn angle_to_geo(theta: f64, phi: f64) -> GeoCoordinate {
    let lat = round_degrees(90.0 - theta.to_degrees()).clamp(MIN_LAT, MAX_LAT);
    let lng = round_degrees(phi.to_degrees()).clamp(MIN_LNG, MAX_LNG);
    GeoCoordinate { lat, lng }
}

/// Rounds to the nearest whole degree, ties away from zero.
#[inline]
pub(crate) fn round_degrees(degrees: f64) -> i32 {
    degrees.round() as i32
}
