use clap::Parser;
use std::process;
use steward::cli::{Cli, Commands};
use steward::config::{load_config, LoggingConfig};
use steward::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let (log_level, logging_config) = logging_settings(&cli);
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Steward - governance catalog export tool"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush the file writer first
    drop(guard);
    process::exit(exit_code);
}

/// Log level and sinks for this invocation
///
/// Commands that talk to the catalog log to file as configured. Everything
/// else, and any run whose configuration does not load, logs to the console
/// only; the command itself reports the configuration problem.
fn logging_settings(cli: &Cli) -> (String, LoggingConfig) {
    let loaded = if cli.command.uses_catalog() {
        load_config(&cli.config).ok()
    } else {
        None
    };

    match loaded {
        Some(config) => (
            cli.log_level
                .clone()
                .unwrap_or(config.application.log_level),
            config.logging,
        ),
        None => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::console_only(),
        ),
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::Preview(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
