//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for telclean using clap.

pub mod commands;

use clap::Parser;

/// telclean - Phone number pseudonymization for delimited exports
#[derive(Parser, Debug)]
#[command(name = "telclean")]
#[command(version, about, long_about = None)]
#[command(author = "Telclean Contributors")]
pub struct Cli {
    /// Path to configuration file (default: telclean.toml if present)
    #[arg(long, env = "TELCLEAN_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TELCLEAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Clean run arguments
    #[command(flatten)]
    pub clean: commands::clean::CleanArgs,
}
