//! CLI module for Taproom
//!
//! Provides command-line interface for:
//! - serve: Open the store and serve the HTTP API
//! - seed: Load sample data and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command, seed, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
