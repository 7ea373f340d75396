//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Steward using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Steward - governance catalog export tool
#[derive(Parser, Debug)]
#[command(name = "steward")]
#[command(version, about, long_about = None)]
#[command(author = "Steward Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "steward.toml", env = "STEWARD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "STEWARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export communities or domains from the catalog to local files
    Export(commands::export::ExportArgs),

    /// Show the communities an export would cover without exporting
    Preview(commands::preview::PreviewArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Whether the command talks to the catalog
    pub fn uses_catalog(&self) -> bool {
        matches!(self, Commands::Export(_) | Commands::Preview(_))
    }
}
