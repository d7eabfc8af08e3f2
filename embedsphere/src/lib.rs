//! embedsphere - place text embeddings on a globe
//!
//! This library turns a table of precomputed text embeddings into JSON a
//! globe front-end can plot: the embeddings are reduced to 2D with t-SNE and
//! the 2D layout is wrapped onto a sphere as latitude/longitude.
//!
//! # High-Level API
//!
//! The [`pipeline`] module runs every step from CSV to JSON:
//!
//! ```no_run
//! use embedsphere::config::TsneConfig;
//! use embedsphere::pipeline::{GenerateConfig, GeneratePipeline};
//! use embedsphere::reduce::TsneReducer;
//!
//! let reducer = TsneReducer::new(TsneConfig::default());
//! let config = GenerateConfig::new("reviews.csv", "public").with_stem("reviews");
//! let report = GeneratePipeline::new(reducer, config).run()?;
//! println!("wrote {}", report.globe_path.display());
//! # Ok::<(), embedsphere::pipeline::PipelineError>(())
//! ```
//!
//! The spherical mapping itself lives in [`coord`] and has no I/O.

pub mod config;
pub mod coord;
pub mod embedding;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod reduce;
pub mod similarity;

/// Version of the embedsphere library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
