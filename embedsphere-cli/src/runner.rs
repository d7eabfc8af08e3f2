//! CLI runner for common setup.
//!
//! Encapsulates config loading and logging initialization so the command
//! handlers only deal with their own work.

use std::path::{Path, PathBuf};
use tracing::info;

use embedsphere::config::ConfigFile;
use embedsphere::logging::{default_log_file, init_logging, LoggingGuard};

use crate::error::CliError;

/// Runner that manages CLI lifecycle.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Load the config file at `config_path` and initialize logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Config file to load; defaults are used if it is missing
    /// * `debug_mode` - Enable debug-level logging and mirror logs to stdout
    pub fn new(config_path: &Path, debug_mode: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load_from(config_path)?;

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| default_log_file().to_string());

        let logging_guard = init_logging(&log_dir, &log_file, debug_mode, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("embedsphere v{}", embedsphere::VERSION);
        info!("embedsphere CLI: {} command", command);
    }
}
