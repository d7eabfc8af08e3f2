//! embedsphere CLI - Command-line interface
//!
//! Turns an embedding CSV into globe-ready JSON and exposes the individual
//! steps (mapping a saved layout, building a similarity index) on their own.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::config::ConfigCommands;
use commands::generate::GenerateArgs;
use commands::index::IndexArgs;
use commands::map::MapArgs;

#[derive(Parser)]
#[command(name = "embedsphere")]
#[command(version = embedsphere::VERSION)]
#[command(about = "Place text embeddings on a globe", long_about = None)]
struct Cli {
    /// Path to the config file (default: ~/.embedsphere/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug-level logging and mirror logs to stdout
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read an embedding CSV, run t-SNE and write the globe JSON files
    Generate(GenerateArgs),

    /// Map a saved 2D layout to spherical and lat/lng coordinates
    Map(MapArgs),

    /// Build a "lat,lng" similarity index from globe records
    Index(IndexArgs),

    /// Create a default configuration file
    Init,

    /// View or modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    let config_path = commands::common::resolve_config_path(cli.config);

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(&config_path, cli.debug, args),
        Commands::Map(args) => commands::map::run(&config_path, cli.debug, args),
        Commands::Index(args) => commands::index::run(&config_path, cli.debug, args),
        Commands::Init => commands::init::run(&config_path),
        Commands::Config { command } => commands::config::run(&config_path, command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
