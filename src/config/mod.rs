//! Configuration management for Steward.
//!
//! Steward reads a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `STEWARD_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation before any remote call is made
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use steward::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("steward.toml")?;
//!
//! println!("Catalog URL: {}", config.catalog.base_url);
//! println!("Communities: {:?}", config.export.communities);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [catalog]
//! base_url = "https://catalog.example.com"
//! username = "svc_export"
//! password = "${STEWARD_CATALOG_PASSWORD}"
//! page_size = 1000
//!
//! [export]
//! communities = ["Finance"]
//! include_relations = false
//!
//! [output]
//! directory = "export"
//! format = "json"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CatalogConfig, Environment, ExportConfig, LoggingConfig, OutputConfig,
    RetryConfig, StewardConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
