//! Similarity scoring and the lat/lng similarity index.
//!
//! The globe front-end colours each placed row by how close its embedding is
//! to a query embedding. The index maps a `"lat,lng"` key to that score.

use rayon::prelude::*;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::coord::{GeoCoordinate, SphericalAngle};

#[derive(Debug, Error, PartialEq)]
pub enum SimilarityError {
    /// Query and row vectors have different dimensions
    #[error("vector length mismatch: query has {query} components, row {row} has {found}")]
    DimensionMismatch {
        row: usize,
        query: usize,
        found: usize,
    },

    /// Angles and coordinates are not paired one-to-one
    #[error("{angles} angles cannot be paired with {coords} coordinates")]
    LengthMismatch { angles: usize, coords: usize },
}

/// Cosine similarity of two vectors of equal length.
///
/// Returns 0 when either vector has zero norm. Returns `None` for vectors of
/// different lengths.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0, 0.0, 0.0), |(dot, na, nb), (&x, &y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        return Some(0.0);
    }
    Some(dot / denominator)
}

/// Cosine similarity of `query` against every row, in row order.
///
/// Rows are scored in parallel.
pub fn similarities<V>(query: &[f64], rows: &[V]) -> Result<Vec<f64>, SimilarityError>
where
    V: AsRef<[f64]> + Sync,
{
    rows.par_iter()
        .enumerate()
        .map(|(row, vector)| {
            let vector = vector.as_ref();
            cosine_similarity(query, vector).ok_or(SimilarityError::DimensionMismatch {
                row,
                query: query.len(),
                found: vector.len(),
            })
        })
        .collect()
}

/// Map of `"lat,lng"` keys to similarity scores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatLngIndex {
    entries: Map<String, Value>,
}

impl LatLngIndex {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.get(key).and_then(Value::as_f64)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON object form, keys in insertion order.
    pub fn as_json(&self) -> &Map<String, Value> {
        &self.entries
    }
}

/// Build the lat/lng similarity index.
///
/// Rows whose angle is exactly (0, 0) are skipped since they carry no
/// placement. When two rows round to the same coordinate the later row wins.
/// Rows without a score (shorter `similarities`) or with a non-finite score
/// are recorded as 0.
pub fn build_lat_lng_index(
    angles: &[SphericalAngle],
    coords: &[GeoCoordinate],
    similarities: &[f64],
) -> Result<LatLngIndex, SimilarityError> {
    if angles.len() != coords.len() {
        return Err(SimilarityError::LengthMismatch {
            angles: angles.len(),
            coords: coords.len(),
        });
    }

    let mut entries = Map::new();
    for (i, (angle, coord)) in angles.iter().zip(coords).enumerate() {
        if angle.is_origin() {
            continue;
        }
        let score = similarities
            .get(i)
            .copied()
            .filter(|s| s.is_finite())
            .unwrap_or(0.0);
        entries.insert(coord.index_key(), Value::from(score));
    }

    tracing::debug!(
        rows = angles.len(),
        keys = entries.len(),
        "Built lat/lng similarity index"
    );
    Ok(LatLngIndex { entries })
}
