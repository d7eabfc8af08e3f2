//! JSON artifacts.
//!
//! Every artifact is a JSON document with one entry per input row, in row
//! order:
//!
//! - records: the source table as an array of flat objects
//! - layout: the 2D reduction as `[[x, y], ...]`
//! - globe: the records plus `theta`, `phi`, `lat`, `lng` (or only `lat`, `lng`)
//! - points: bare `{theta, phi, lat, lng}` objects for a mapped layout
//! - index: `{"lat,lng": similarity, ...}`

mod fields;

pub use fields::OutputFields;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::coord::{GeoCoordinate, Point2D, SphericalAngle};
use crate::embedding::{parse_vector, EmbeddingTable, EMBEDDING_COLUMN};
use crate::similarity::LatLngIndex;

#[derive(Debug, Error)]
pub enum OutputError {
    /// File could not be created, written or read
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record read back from disk lacks a required field
    #[error("record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// A source row merged with its placement on the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord {
    pub metadata: Map<String, Value>,
    pub angle: SphericalAngle,
    pub coord: GeoCoordinate,
}

impl MappedRecord {
    /// Parsed embedding vector from the `embedding` metadata field.
    pub fn embedding(&self) -> Option<Vec<f64>> {
        match self.metadata.get(EMBEDDING_COLUMN)? {
            Value::String(text) => parse_vector(text).ok(),
            Value::Array(items) => items.iter().map(Value::as_f64).collect(),
            _ => None,
        }
    }

    fn to_json(&self, fields: OutputFields) -> Value {
        let mut object = self.metadata.clone();
        if fields.includes_angles() {
            object.insert("theta".to_string(), Value::from(self.angle.theta));
            object.insert("phi".to_string(), Value::from(self.angle.phi));
        }
        object.insert("lat".to_string(), Value::from(self.coord.lat));
        object.insert("lng".to_string(), Value::from(self.coord.lng));
        Value::Object(object)
    }
}

/// A mapped layout point without source metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobePoint {
    pub theta: f64,
    pub phi: f64,
    pub lat: i32,
    pub lng: i32,
}

impl GlobePoint {
    pub fn new(angle: SphericalAngle, coord: GeoCoordinate) -> Self {
        Self {
            theta: angle.theta,
            phi: angle.phi,
            lat: coord.lat,
            lng: coord.lng,
        }
    }
}

/// Write the source table as an array of flat records.
pub fn write_records(path: &Path, table: &EmbeddingTable) -> Result<(), OutputError> {
    let records: Vec<&Map<String, Value>> = table.records().iter().map(|r| &r.metadata).collect();
    write_json(path, &records)?;
    debug!(path = %path.display(), rows = records.len(), "Wrote records");
    Ok(())
}

/// Write a 2D layout as `[[x, y], ...]`.
pub fn write_layout(path: &Path, points: &[Point2D]) -> Result<(), OutputError> {
    let pairs: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
    write_json(path, &pairs)?;
    debug!(path = %path.display(), points = pairs.len(), "Wrote layout");
    Ok(())
}

/// Read a 2D layout written by [`write_layout`].
pub fn read_layout(path: &Path) -> Result<Vec<Point2D>, OutputError> {
    let pairs: Vec<[f64; 2]> = read_json(path)?;
    Ok(pairs.into_iter().map(Point2D::from).collect())
}

/// Write records merged with their globe placement.
pub fn write_mapped_records(
    path: &Path,
    records: &[MappedRecord],
    fields: OutputFields,
) -> Result<(), OutputError> {
    let values: Vec<Value> = records.iter().map(|r| r.to_json(fields)).collect();
    write_json(path, &values)?;
    debug!(path = %path.display(), rows = values.len(), %fields, "Wrote globe records");
    Ok(())
}

/// Read records written by [`write_mapped_records`] with [`OutputFields::Full`].
///
/// The placement fields are split back out of the metadata.
pub fn read_mapped_records(path: &Path) -> Result<Vec<MappedRecord>, OutputError> {
    let values: Vec<Map<String, Value>> = read_json(path)?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, mut metadata)| {
            let theta = take_f64(&mut metadata, "theta", index)?;
            let phi = take_f64(&mut metadata, "phi", index)?;
            let lat = take_i32(&mut metadata, "lat", index)?;
            let lng = take_i32(&mut metadata, "lng", index)?;
            Ok(MappedRecord {
                metadata,
                angle: SphericalAngle::new(theta, phi),
                coord: GeoCoordinate { lat, lng },
            })
        })
        .collect()
}

/// Write mapped layout points.
pub fn write_points(path: &Path, points: &[GlobePoint]) -> Result<(), OutputError> {
    write_json(path, &points)
}

/// Write a lat/lng similarity index as a JSON object.
pub fn write_index(path: &Path, index: &LatLngIndex) -> Result<(), OutputError> {
    write_json(path, index.as_json())?;
    debug!(path = %path.display(), keys = index.len(), "Wrote similarity index");
    Ok(())
}

/// Read a JSON document from a file.
pub fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, OutputError> {
    let file = File::open(path).map_err(|source| io_error(path, source))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }

    let file = File::create(path).map_err(|source| io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush().map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> OutputError {
    OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn take_f64(metadata: &mut Map<String, Value>, key: &str, index: usize) -> Result<f64, OutputError> {
    metadata
        .remove(key)
        .as_ref()
        .and_then(Value::as_f64)
        .ok_or_else(|| OutputError::InvalidRecord {
            index,
            reason: format!("missing or non-numeric '{}'", key),
        })
}

fn take_i32(metadata: &mut Map<String, Value>, key: &str, index: usize) -> Result<i32, OutputError> {
    metadata
        .remove(key)
        .as_ref()
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| OutputError::InvalidRecord {
            index,
            reason: format!("missing or non-integer '{}'", key),
        })
}
