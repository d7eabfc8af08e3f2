//! The generate pipeline and the smaller flows built on the same stages.
//!
//! ```text
//! CSV → EmbeddingTable → <stem>.json
//!                      → matrix → Reducer → <stem>_tsne.json
//!                                         → to_unit_sphere → to_geo_coordinates → <stem>_globe.json
//! ```
//!
//! The mapper only sees plain vectors. Its output is zipped back onto the
//! source records here, producing new [`MappedRecord`]s rather than mutating
//! the table.

mod error;

pub use error::PipelineError;

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::coord::{self, DegeneratePolicy, Point2D};
use crate::embedding::EmbeddingTable;
use crate::output::{self, GlobePoint, MappedRecord, OutputFields};
use crate::reduce::Reducer;
use crate::similarity::{self, LatLngIndex};

/// Default artifact file stem.
pub const DEFAULT_STEM: &str = "embeddings";

/// Inputs and output options for [`GeneratePipeline`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateConfig {
    input: PathBuf,
    output_dir: PathBuf,
    stem: String,
    fields: OutputFields,
    policy: DegeneratePolicy,
}

impl GenerateConfig {
    /// Create a configuration reading `input` and writing into `output_dir`.
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            stem: DEFAULT_STEM.to_string(),
            fields: OutputFields::default(),
            policy: DegeneratePolicy::default(),
        }
    }

    /// Set the artifact file stem. Default: `embeddings`.
    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = stem.into();
        self
    }

    /// Set the placement fields written to globe records. Default: full.
    pub fn with_fields(mut self, fields: OutputFields) -> Self {
        self.fields = fields;
        self
    }

    /// Set the degenerate radius policy. Default: collapse.
    pub fn with_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn fields(&self) -> OutputFields {
        self.fields
    }

    pub fn policy(&self) -> DegeneratePolicy {
        self.policy
    }

    /// Path of the raw records artifact.
    pub fn records_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.json", self.stem))
    }

    /// Path of the 2D layout artifact.
    pub fn layout_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_tsne.json", self.stem))
    }

    /// Path of the globe records artifact.
    pub fn globe_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_globe.json", self.stem))
    }
}

/// Summary of a completed [`GeneratePipeline::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    pub rows: usize,
    pub dimension: usize,
    pub records_path: PathBuf,
    pub layout_path: PathBuf,
    pub globe_path: PathBuf,
}

/// Reads an embedding CSV, reduces it, maps it to the globe, and writes
/// every artifact.
pub struct GeneratePipeline<R: Reducer> {
    reducer: R,
    config: GenerateConfig,
}

impl<R: Reducer> GeneratePipeline<R> {
    pub fn new(reducer: R, config: GenerateConfig) -> Self {
        Self { reducer, config }
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Run every step in order. Nothing after the failing step is written.
    pub fn run(&self) -> Result<GenerateReport, PipelineError> {
        let start = Instant::now();
        let config = &self.config;

        let table = EmbeddingTable::read_csv(config.input())?;
        let records_path = config.records_path();
        output::write_records(&records_path, &table)?;

        let matrix = table.matrix()?;
        let (rows, dimension) = matrix.dim();
        info!(
            rows,
            dimension,
            reducer = self.reducer.name(),
            "Reducing embeddings"
        );

        let layout = self.reducer.reduce(matrix.view())?;
        if layout.len() != rows {
            return Err(PipelineError::LayoutLength {
                reducer: self.reducer.name().to_string(),
                expected: rows,
                found: layout.len(),
            });
        }
        let layout_path = config.layout_path();
        output::write_layout(&layout_path, &layout)?;

        let mapped = map_table(&table, &layout, config.policy())?;
        let globe_path = config.globe_path();
        output::write_mapped_records(&globe_path, &mapped, config.fields())?;

        info!(
            rows,
            elapsed_ms = start.elapsed().as_millis() as u64,
            globe = %globe_path.display(),
            "Generate pipeline complete"
        );

        Ok(GenerateReport {
            rows,
            dimension,
            records_path,
            layout_path,
            globe_path,
        })
    }
}

/// Merge a layout into the table rows, producing globe records.
///
/// `layout` must hold one point per row.
pub fn map_table(
    table: &EmbeddingTable,
    layout: &[Point2D],
    policy: DegeneratePolicy,
) -> Result<Vec<MappedRecord>, PipelineError> {
    if layout.len() != table.len() {
        return Err(PipelineError::LayoutLength {
            reducer: "layout".to_string(),
            expected: table.len(),
            found: layout.len(),
        });
    }

    let angles = coord::to_unit_sphere_with(layout, policy)?;
    let coords = coord::to_geo_coordinates(&angles)?;

    let mapped = table
        .records()
        .iter()
        .zip(angles)
        .zip(coords)
        .map(|((record, angle), coord)| MappedRecord {
            metadata: record.metadata.clone(),
            angle,
            coord,
        })
        .collect::<Vec<_>>();

    debug!(rows = mapped.len(), %policy, "Mapped records onto the globe");
    Ok(mapped)
}

/// Map a bare 2D layout to globe points.
pub fn map_layout(
    layout: &[Point2D],
    policy: DegeneratePolicy,
) -> Result<Vec<GlobePoint>, PipelineError> {
    let angles = coord::to_unit_sphere_with(layout, policy)?;
    let coords = coord::to_geo_coordinates(&angles)?;

    Ok(angles
        .into_iter()
        .zip(coords)
        .map(|(angle, coord)| GlobePoint::new(angle, coord))
        .collect())
}

/// Score every globe record against `query` and build the lat/lng index.
///
/// Every record must carry a parseable `embedding` of the query's length.
pub fn index_records(
    records: &[MappedRecord],
    query: &[f64],
) -> Result<LatLngIndex, PipelineError> {
    let embeddings = records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            record
                .embedding()
                .ok_or(PipelineError::MissingEmbedding { row })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let scores = similarity::similarities(query, &embeddings)?;
    let angles: Vec<_> = records.iter().map(|r| r.angle).collect();
    let coords: Vec<_> = records.iter().map(|r| r.coord).collect();

    Ok(similarity::build_lat_lng_index(&angles, &coords, &scores)?)
}
