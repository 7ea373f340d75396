//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Steward configuration file.

use super::{exit_code_for, EXIT_CONFIG_ERROR};
use crate::adapters::catalog::HttpCatalogClient;
use crate::config::{load_config, StewardConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Also send one request to the catalog with the configured credentials
    #[arg(long)]
    pub check_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("{}", summarize(&config));

        if self.check_connection {
            return Ok(check_connection(&config).await);
        }
        Ok(0)
    }
}

async fn check_connection(config: &StewardConfig) -> i32 {
    println!();
    println!("🔌 Checking catalog connection: {}", config.catalog.base_url);

    let result = match HttpCatalogClient::new(config.catalog.clone()) {
        Ok(client) => client.health_check().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            println!("✅ Catalog is reachable");
            0
        }
        Err(e) => {
            println!("❌ Catalog check failed");
            println!("   Error: {e}");
            exit_code_for(&e)
        }
    }
}

fn summarize(config: &StewardConfig) -> String {
    let selection = |names: &[String]| {
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    };

    [
        "Configuration Summary:".to_string(),
        format!("  Environment: {:?}", config.environment),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Dry Run: {}", config.application.dry_run),
        format!("  Catalog: {}", config.catalog.base_url),
        format!("  Auth Type: {}", config.catalog.auth_type),
        format!("  Page Size: {}", config.catalog.page_size),
        format!("  Max Retries: {}", config.catalog.retry.max_retries),
        format!("  Communities: {}", selection(&config.export.communities)),
        format!("  Domains: {}", selection(&config.export.domains)),
        format!("  All Roots: {}", config.export.all_roots),
        format!(
            "  Facets: assets={} attributes={} relations={} responsibilities={}",
            config.export.include_assets,
            config.export.include_attributes,
            config.export.include_relations,
            config.export.include_responsibilities
        ),
        format!(
            "  Output: {} ({})",
            config.output.directory.display(),
            config.output.format
        ),
    ]
    .join("\n")
}
