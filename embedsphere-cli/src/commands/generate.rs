//! `generate` command: CSV → records, layout and globe JSON.

use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

use embedsphere::config::TsneConfig;
use embedsphere::pipeline::{GenerateConfig, GeneratePipeline, DEFAULT_STEM};
use embedsphere::reduce::TsneReducer;

use super::common::{DegenerateArg, FieldsArg};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the generate command.
///
/// Every optional flag overrides the matching config file setting.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Embedding CSV with an `embedding` column
    #[arg(long, short)]
    pub input: PathBuf,

    /// Directory for the generated JSON files (config: output.directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Artifact file stem (default: the input file name)
    #[arg(long)]
    pub name: Option<String>,

    /// t-SNE perplexity (config: tsne.perplexity)
    #[arg(long)]
    pub perplexity: Option<f64>,

    /// Seed for the t-SNE initial layout (config: tsne.seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// t-SNE iterations (config: tsne.max_iter)
    #[arg(long)]
    pub max_iter: Option<usize>,

    /// Placement fields written to globe records (config: output.fields)
    #[arg(long, value_enum)]
    pub fields: Option<FieldsArg>,

    /// Behaviour for layouts where every point has the same radius (config: mapper.degenerate)
    #[arg(long, value_enum)]
    pub degenerate: Option<DegenerateArg>,
}

/// Run the generate command.
pub fn run(config_path: &Path, debug: bool, args: GenerateArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, debug)?;
    runner.log_startup("generate");
    let config = runner.config();

    let tsne = apply_tsne_overrides(config.tsne.to_config(), &args)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    let stem = args
        .name
        .clone()
        .unwrap_or_else(|| default_stem(&args.input));

    let generate = GenerateConfig::new(&args.input, output_dir)
        .with_stem(stem)
        .with_fields(args.fields.map(Into::into).unwrap_or(config.output.fields))
        .with_policy(
            args.degenerate
                .map(Into::into)
                .unwrap_or(config.mapper.degenerate),
        );

    println!("Reading {}", args.input.display());
    println!(
        "Running t-SNE (perplexity {}, seed {}, {} iterations)...",
        tsne.perplexity(),
        tsne.seed(),
        tsne.max_iter()
    );

    let report = GeneratePipeline::new(TsneReducer::new(tsne), generate).run()?;

    info!(rows = report.rows, dimension = report.dimension, "Generate finished");
    println!();
    println!("Mapped {} rows ({} dimensions)", report.rows, report.dimension);
    println!("  Records: {}", report.records_path.display());
    println!("  Layout:  {}", report.layout_path.display());
    println!("  Globe:   {}", report.globe_path.display());

    Ok(())
}

fn apply_tsne_overrides(mut tsne: TsneConfig, args: &GenerateArgs) -> Result<TsneConfig, CliError> {
    if let Some(perplexity) = args.perplexity {
        if !(perplexity.is_finite() && perplexity > 0.0) {
            return Err(CliError::InvalidArgument(
                "--perplexity must be a positive number".to_string(),
            ));
        }
        tsne = tsne.with_perplexity(perplexity);
    }
    if let Some(seed) = args.seed {
        tsne = tsne.with_seed(seed);
    }
    if let Some(max_iter) = args.max_iter {
        if max_iter == 0 {
            return Err(CliError::InvalidArgument(
                "--max-iter must be at least 1".to_string(),
            ));
        }
        tsne = tsne.with_max_iter(max_iter);
    }
    Ok(tsne)
}

fn default_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_STEM.to_string())
}
