//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "steward.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Steward configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your catalog URL", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set STEWARD_CATALOG_USERNAME and STEWARD_CATALOG_PASSWORD");
                println!("  3. Validate configuration: steward validate-config");
                println!("  4. Preview the scope: steward preview --community <NAME>");
                println!("  5. Run export: steward export --community <NAME>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Steward Configuration File
# Governance catalog export tool

[application]
log_level = "info"
dry_run = false

[catalog]
base_url = "https://catalog.example.com"

# Authentication
auth_type = "basic"
username = "${STEWARD_CATALOG_USERNAME}"
password = "${STEWARD_CATALOG_PASSWORD}"

tls_verify = true
page_size = 1000

[export]
communities = []
domains = []
all_roots = false

[output]
directory = "export"
format = "json"

[logging]
local_enabled = true
local_path = "/var/log/steward"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Steward Configuration File
# Governance catalog export tool
#
# This file contains all configuration options with examples and explanations.
# Every key can also be overridden with a STEWARD_<SECTION>_<KEY> environment
# variable, for example STEWARD_CATALOG_PAGE_SIZE=500.

# Runtime environment (development, staging, production)
# TLS verification cannot be disabled in production.
environment = "development"

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (fetch and render everything, write no files)
dry_run = false

# ============================================================================
# Catalog Server Configuration
# ============================================================================
[catalog]
# Base URL of the catalog server; requests go to <base_url>/rest/2.0/...
base_url = "https://catalog.example.com"

# Authentication type (basic or none)
auth_type = "basic"

# Credentials (use environment variables)
username = "${STEWARD_CATALOG_USERNAME}"
password = "${STEWARD_CATALOG_PASSWORD}"

# TLS/SSL verification
tls_verify = true

# Request timeout in seconds
timeout_seconds = 60

# Items requested per page for every listing (1-1000)
page_size = 1000

# Retry policy for transient failures (timeouts, 429, 5xx)
[catalog.retry]
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

# ============================================================================
# Export Selection
# ============================================================================
[export]
# Communities to export by exact name; each one includes all sub-communities
communities = ["Finance", "Human Resources"]

# Domains to export by exact name
domains = []

# Export every top-level community (communities without a parent)
all_roots = false

# Asset enrichment
# With include_assets = false only communities and domains are exported.
include_assets = true
include_attributes = true
include_relations = true
include_responsibilities = true

# ============================================================================
# Output
# ============================================================================
[output]
# One file per exported unit is written here
directory = "export"

# Output format:
# - json: one pretty-printed document per unit
# - jsonl: one line per asset (or per domain when assets are skipped)
format = "json"

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log file with rotation (daily, hourly, never)
local_enabled = true
local_path = "/var/log/steward"
local_rotation = "daily"
"#
        .to_string()
    }
}
