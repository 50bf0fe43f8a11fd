//! Command-line argument definitions for the BPMM CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input document, the optional
//! normalized output, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the BPMM document inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input BPMM document (JSON)
    #[arg(help = "Path to the input document")]
    pub input: String,

    /// Path to write the normalized document to
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
