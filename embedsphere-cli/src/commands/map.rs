//! `map` command: saved 2D layout → globe points.

use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

use embedsphere::output::{read_layout, write_points};
use embedsphere::pipeline::map_layout;

use super::common::DegenerateArg;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the map command.
#[derive(Debug, Args)]
pub struct MapArgs {
    /// Layout JSON in the form [[x, y], ...]
    #[arg(long)]
    pub layout: PathBuf,

    /// Output JSON, written as [{theta, phi, lat, lng}, ...]
    #[arg(long, short)]
    pub output: PathBuf,

    /// Behaviour for layouts where every point has the same radius (config: mapper.degenerate)
    #[arg(long, value_enum)]
    pub degenerate: Option<DegenerateArg>,
}

/// Run the map command.
pub fn run(config_path: &Path, debug: bool, args: MapArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, debug)?;
    runner.log_startup("map");

    let policy = args
        .degenerate
        .map(Into::into)
        .unwrap_or(runner.config().mapper.degenerate);

    let layout = read_layout(&args.layout)?;
    let points = map_layout(&layout, policy)?;
    write_points(&args.output, &points)?;

    info!(points = points.len(), %policy, "Layout mapped");
    println!("Mapped {} points to {}", points.len(), args.output.display());

    Ok(())
}
