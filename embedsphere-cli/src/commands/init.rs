//! `init` command: write a default config file.

use std::path::Path;

use embedsphere::config::ConfigFile;

use crate::error::CliError;

/// Create the config file at `config_path` unless one already exists.
pub fn run(config_path: &Path) -> Result<(), CliError> {
    if ConfigFile::ensure_exists_at(config_path)? {
        println!("Created configuration file: {}", config_path.display());
        println!();
        println!("Edit it directly or use 'embedsphere config set <key> <value>'.");
    } else {
        println!("Configuration file already exists: {}", config_path.display());
    }
    Ok(())
}
