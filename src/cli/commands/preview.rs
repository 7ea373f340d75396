//! Preview command implementation
//!
//! Shows which communities an export of each selected unit would cover.
//! Only the community hierarchy is fetched.

use super::{exit_code_for, prepare, UnitSelection, EXIT_CONFIG_ERROR};
use crate::config::load_config;
use clap::Args;

/// Arguments for the preview command
#[derive(Args, Debug, Default)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub units: UnitSelection,

    /// Print the preview as JSON
    #[arg(long)]
    pub json: bool,
}

impl PreviewArgs {
    /// Execute the preview command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting preview command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };
        self.units.apply(&mut config);

        if let Err(e) = config.validate() {
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let (coordinator, units) = match prepare(&config).await {
            Ok(prepared) => prepared,
            Err(code) => return Ok(code),
        };

        for unit in &units {
            let preview = match coordinator.preview(unit) {
                Ok(p) => p,
                Err(e) => {
                    crate::log_error_with_context!(&e, format!("Failed to preview {unit}"));
                    eprintln!("Failed to preview {unit}: {e}");
                    return Ok(exit_code_for(&e));
                }
            };

            if self.json {
                println!("{}", serde_json::to_string_pretty(&preview)?);
            } else {
                println!("{unit}: {} communities", preview.communities.len());
                println!("{}", preview.render());
                println!();
            }
        }

        Ok(0)
    }
}
