//! Export command implementation
//!
//! This module implements the `export` command for exporting communities
//! and domains from the governance catalog to local files.

use super::{exit_code_for, prepare, UnitSelection, EXIT_CONFIG_ERROR};
use crate::config::{load_config, StewardConfig};
use crate::core::export::{ExportResult, ExportUnit};
use crate::domain::OutputFormat;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - fetch and render everything without writing files
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub units: UnitSelection,

    /// Export communities and domains only, without assets
    #[arg(long)]
    pub structure_only: bool,

    /// Override output format (json or jsonl)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Override output directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl ExportArgs {
    /// Apply CLI overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut StewardConfig) {
        self.units.apply(config);

        if self.structure_only {
            tracing::info!("Skipping assets from CLI");
            config.export.include_assets = false;
        }

        if let Some(format) = self.format {
            tracing::info!(format = %format, "Overriding output format from CLI");
            config.output.format = format;
        }

        if let Some(dir) = &self.output_dir {
            tracing::info!(directory = %dir.display(), "Overriding output directory from CLI");
            config.output.directory = dir.clone();
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };
        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let dry_run = config.application.dry_run;
        if dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        let (coordinator, units) = match prepare(&config).await {
            Ok(prepared) => prepared,
            Err(code) => return Ok(code),
        };

        if !self.yes && !dry_run && !confirm(&config, &units)? {
            println!("Export cancelled.");
            return Ok(0);
        }

        println!("🚀 Starting export...");
        println!();

        let summary = match coordinator.run(&units, &config.export_options()).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!();
        println!("📊 Export Summary:");
        println!("  Run: {}", summary.run_id);
        println!("  Units: {}", summary.total_units());
        println!("  Successful: {}", summary.successful_exports());
        println!("  Failed: {}", summary.failed_exports());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        println!();

        for result in &summary.results {
            match result {
                ExportResult::Success {
                    unit_name,
                    location,
                } => println!("  ✔ {unit_name} -> {location}"),
                ExportResult::Failure { unit_name, error } => {
                    println!("  ✘ {unit_name}: {error}")
                }
            }
        }
        println!();

        let exit_code = if summary.is_successful() {
            println!("✅ Export completed successfully!");
            0
        } else {
            println!("⚠️  Export completed with failures");
            1
        };

        Ok(exit_code)
    }
}

fn confirm(config: &StewardConfig, units: &[ExportUnit]) -> anyhow::Result<bool> {
    use std::io::{self, Write};

    println!("Export Configuration:");
    println!("  Catalog: {}", config.catalog.base_url);
    println!("  Units:");
    for unit in units {
        println!("    - {unit}");
    }
    println!("  Assets: {}", config.export.include_assets);
    println!("  Format: {}", config.output.format);
    println!("  Output: {}", config.output.directory.display());
    println!();
    print!("Proceed with export? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_args_defaults() {
        let args = ExportArgs::default();

        assert!(!args.yes);
        assert!(!args.dry_run);
        assert!(args.units.is_empty());
        assert!(args.format.is_none());
        assert!(args.output_dir.is_none());
    }

    #[test]
    fn test_export_args_with_overrides() {
        let args = ExportArgs {
            yes: true,
            dry_run: true,
            units: UnitSelection {
                community: vec!["Finance".to_string()],
                ..Default::default()
            },
            structure_only: true,
            format: Some(OutputFormat::Jsonl),
            output_dir: Some(PathBuf::from("out")),
        };

        let mut config = StewardConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.export.communities, vec!["Finance".to_string()]);
        assert!(!config.export.include_assets);
        assert_eq!(config.output.format, OutputFormat::Jsonl);
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert!(config.application.dry_run);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = StewardConfig::default();
        config.output.format = OutputFormat::Jsonl;

        ExportArgs::default().apply_overrides(&mut config);

        assert_eq!(config.output.format, OutputFormat::Jsonl);
        assert!(config.export.include_assets);
        assert!(!config.application.dry_run);
    }
}
