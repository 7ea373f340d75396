//! CLI command implementations
//!
//! This module contains all CLI command implementations.
//!
//! Commands return a process exit code:
//! - `0` success
//! - `1` export finished with failed units
//! - `2` configuration or selection error
//! - `4` catalog connection error
//! - `5` fatal error

pub mod export;
pub mod init;
pub mod preview;
pub mod validate;

use crate::config::StewardConfig;
use crate::core::export::{ExportCoordinator, ExportUnit};
use crate::domain::StewardError;

/// Exit code for configuration and selection errors
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Exit code for catalog connection errors
pub const EXIT_CONNECTION_ERROR: i32 = 4;

/// Exit code for anything else
pub const EXIT_FATAL: i32 = 5;

/// Unit names given on the command line
///
/// When any name or `--all-roots` is given, the selection replaces the
/// `[export]` selection from the configuration file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct UnitSelection {
    /// Community to export, by exact name (repeatable)
    #[arg(long = "community", value_name = "NAME")]
    pub community: Vec<String>,

    /// Domain to export, by exact name (repeatable)
    #[arg(long = "domain", value_name = "NAME")]
    pub domain: Vec<String>,

    /// Export every top-level community
    #[arg(long)]
    pub all_roots: bool,
}

impl UnitSelection {
    pub fn is_empty(&self) -> bool {
        self.community.is_empty() && self.domain.is_empty() && !self.all_roots
    }

    /// Replace the configured selection when one was given
    pub fn apply(&self, config: &mut StewardConfig) {
        if self.is_empty() {
            return;
        }
        tracing::info!(
            communities = ?self.community,
            domains = ?self.domain,
            all_roots = self.all_roots,
            "Overriding unit selection from CLI"
        );
        config.export.communities = self.community.clone();
        config.export.domains = self.domain.clone();
        config.export.all_roots = self.all_roots;
    }
}

/// Connect to the catalog, load the hierarchy and resolve the configured units
///
/// Errors are reported to the user and mapped to an exit code.
pub(crate) async fn prepare(
    config: &StewardConfig,
) -> Result<(ExportCoordinator, Vec<ExportUnit>), i32> {
    if !config.export.has_selection() {
        eprintln!("Nothing selected: pass --community, --domain or --all-roots, or set [export] in the configuration");
        return Err(EXIT_CONFIG_ERROR);
    }

    let coordinator = match ExportCoordinator::from_config(config).await {
        Ok(c) => c,
        Err(e) => {
            crate::log_error_with_context!(&e, "Failed to create export coordinator");
            eprintln!("Failed to initialize export: {e}");
            return Err(exit_code_for(&e));
        }
    };

    match coordinator
        .resolve_units(
            &config.export.communities,
            &config.export.domains,
            config.export.all_roots,
        )
        .await
    {
        Ok(units) => Ok((coordinator, units)),
        Err(e) => {
            crate::log_error_with_context!(&e, "Failed to resolve export units");
            eprintln!("Failed to resolve export units: {e}");
            Err(exit_code_for(&e))
        }
    }
}

/// Exit code for an error that ended a command
pub fn exit_code_for(error: &StewardError) -> i32 {
    match error {
        StewardError::Configuration(_) | StewardError::Validation(_) | StewardError::NotFound(_) => {
            EXIT_CONFIG_ERROR
        }
        StewardError::Catalog(_) => EXIT_CONNECTION_ERROR,
        _ => EXIT_FATAL,
    }
}
