//! `index` command: globe records + query embedding → `"lat,lng"` similarity index.

use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

use embedsphere::embedding::parse_vector;
use embedsphere::output::{read_mapped_records, write_index};
use embedsphere::pipeline::index_records;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the index command.
#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Globe records written by `generate` with full fields
    #[arg(long)]
    pub records: PathBuf,

    /// Query embedding as a JSON array (e.g. "[0.1, -0.2]") or a file containing one
    #[arg(long)]
    pub query: String,

    /// Output JSON object mapping "lat,lng" to similarity
    #[arg(long, short)]
    pub output: PathBuf,
}

/// Run the index command.
pub fn run(config_path: &Path, debug: bool, args: IndexArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, debug)?;
    runner.log_startup("index");

    let query = load_query(&args.query)?;
    let records = read_mapped_records(&args.records)?;
    let index = index_records(&records, &query)?;
    write_index(&args.output, &index)?;

    info!(records = records.len(), keys = index.len(), "Similarity index written");
    println!(
        "Indexed {} records into {} locations: {}",
        records.len(),
        index.len(),
        args.output.display()
    );

    Ok(())
}

/// Parse the query as an inline JSON array, or read it from a file.
fn load_query(query: &str) -> Result<Vec<f64>, CliError> {
    let text = if query.trim_start().starts_with('[') {
        query.to_string()
    } else {
        std::fs::read_to_string(query).map_err(|e| {
            CliError::InvalidArgument(format!("cannot read query file '{}': {}", query, e))
        })?
    };

    parse_vector(&text)
        .map_err(|reason| CliError::InvalidArgument(format!("query embedding: {}", reason)))
}
