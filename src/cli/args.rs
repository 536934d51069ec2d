//! CLI argument definitions using clap
//!
//! Commands:
//! - taproom serve [--config <path>] [--port <port>] [--seed]
//! - taproom seed [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Taproom - reactive beer and customer API
#[derive(Parser, Debug)]
#[command(name = "taproom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,

        /// Replace stored beers and customers with sample data before serving
        #[arg(long)]
        seed: bool,
    },

    /// Replace stored beers and customers with sample data and exit
    Seed {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
