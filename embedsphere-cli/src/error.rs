//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use embedsphere::config::ConfigFileError;
use embedsphere::output::OutputError;
use embedsphere::pipeline::PipelineError;
use embedsphere::reduce::ReduceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Config file could not be read or written
    ConfigFile(ConfigFileError),
    /// A command argument could not be used
    InvalidArgument(String),
    /// A pipeline step failed
    Pipeline(PipelineError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Pipeline(PipelineError::Reduce(ReduceError::InvalidPerplexity {
                rows, ..
            })) => {
                eprintln!();
                eprintln!(
                    "Perplexity must be below {:.1} for {} rows.",
                    (*rows as f64 - 1.0) / 3.0,
                    rows
                );
                eprintln!("Lower it with --perplexity or 'embedsphere config set tsne.perplexity <value>'.");
            }
            CliError::Pipeline(PipelineError::Coord(
                embedsphere::coord::CoordError::DegenerateInput { .. },
            )) => {
                eprintln!();
                eprintln!("Use --degenerate collapse to place such layouts at the north pole.");
            }
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value with 'embedsphere config set <key> <value>'.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Pipeline(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Pipeline(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        CliError::Pipeline(e)
    }
}

impl From<OutputError> for CliError {
    fn from(e: OutputError) -> Self {
        CliError::Pipeline(PipelineError::Output(e))
    }
}
