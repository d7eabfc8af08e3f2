//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (get, set, list, path)
//! - [`generate`] - CSV to globe JSON, end to end
//! - [`index`] - Lat/lng similarity index from globe records
//! - [`init`] - Configuration initialization
//! - [`map`] - Saved 2D layout to globe points

pub mod common;
pub mod config;
pub mod generate;
pub mod index;
pub mod init;
pub mod map;
