//! Configuration schema types
//!
//! This module defines the configuration structure for Steward.

use crate::config::SecretString;
use crate::domain::{ExportOptions, OutputDestination, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest page the catalog API accepts
pub const MAX_PAGE_SIZE: usize = 1000;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main Steward configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StewardConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Catalog server configuration
    pub catalog: CatalogConfig,

    /// What to export
    #[serde(default)]
    pub export: ExportConfig,

    /// Where to write
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StewardConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.catalog.validate(&self.environment)?;
        self.export.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Build the capability flags and destination for an export run
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            include_assets: self.export.include_assets,
            include_attributes: self.export.include_attributes,
            include_relations: self.export.include_relations,
            include_responsibilities: self.export.include_responsibilities,
            destination: OutputDestination {
                directory: self.output.directory.clone(),
                format: self.output.format,
            },
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (fetch everything, write nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Transport retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (1 = no retry)
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 {
            return Err("catalog.retry.max_retries must be at least 1".to_string());
        }
        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "catalog.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Catalog server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog server (without the REST path)
    pub base_url: String,

    /// Authentication type (basic or none)
    #[serde(default = "default_auth_type")]
    pub auth_type: String,

    /// Username for authentication
    #[serde(default)]
    pub username: Option<String>,

    /// Password for authentication
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// TLS certificate verification enabled
    ///
    /// Cannot be disabled in production environments.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Page size used by every paginated listing
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl CatalogConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("catalog.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("catalog.base_url must start with http:// or https://".to_string());
        }

        let valid_auth_types = ["basic", "none"];
        if !valid_auth_types.contains(&self.auth_type.as_str()) {
            return Err(format!(
                "Invalid auth_type '{}'. Must be one of: {}",
                self.auth_type,
                valid_auth_types.join(", ")
            ));
        }

        if self.auth_type == "basic" {
            if self.username.as_ref().map(|s| s.is_empty()).unwrap_or(true) {
                return Err(
                    "catalog.username cannot be empty when auth_type is 'basic'".to_string()
                );
            }

            if self
                .password
                .as_ref()
                .map(|s| s.expose_secret().is_empty())
                .unwrap_or(true)
            {
                return Err(
                    "catalog.password cannot be empty when auth_type is 'basic'".to_string()
                );
            }
        }

        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Set 'tls_verify = true', or use environment = \"development\" or \"staging\" \
                for testing."
                    .to_string(),
            );
        }

        if self.timeout_seconds == 0 {
            return Err("catalog.timeout_seconds must be > 0".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(format!(
                "catalog.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            ));
        }

        self.retry.validate()?;
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            auth_type: default_auth_type(),
            username: None,
            password: None,
            tls_verify: true,
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
            retry: RetryConfig::default(),
        }
    }
}

/// Export selection and enrichment flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Community names to export (exact match)
    #[serde(default)]
    pub communities: Vec<String>,

    /// Domain names to export (exact match)
    #[serde(default)]
    pub domains: Vec<String>,

    /// Export every root community
    #[serde(default)]
    pub all_roots: bool,

    /// Fetch assets per domain
    #[serde(default = "default_true")]
    pub include_assets: bool,

    /// Fetch attributes per asset
    #[serde(default = "default_true")]
    pub include_attributes: bool,

    /// Fetch relations per asset
    #[serde(default = "default_true")]
    pub include_relations: bool,

    /// Fetch responsibilities per asset
    #[serde(default = "default_true")]
    pub include_responsibilities: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(blank) = self
            .communities
            .iter()
            .chain(self.domains.iter())
            .find(|name| name.trim().is_empty())
        {
            return Err(format!("export selection contains a blank name: {blank:?}"));
        }
        Ok(())
    }

    /// Whether any unit is selected
    pub fn has_selection(&self) -> bool {
        self.all_roots || !self.communities.is_empty() || !self.domains.is_empty()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            communities: Vec::new(),
            domains: Vec::new(),
            all_roots: false,
            include_assets: true,
            include_attributes: true,
            include_relations: true,
            include_responsibilities: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one file per unit
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// Output format (json or jsonl)
    #[serde(default)]
    pub format: OutputFormat,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.as_os_str().is_empty() {
            return Err("output.directory cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            format: OutputFormat::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly or never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }

    /// Console-only logging, as used by the CLI before a config is loaded
    pub fn console_only() -> Self {
        Self {
            local_enabled: false,
            local_path: String::new(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_auth_type() -> String {
    "basic".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_page_size() -> usize {
    MAX_PAGE_SIZE
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("export")
}

fn default_local_path() -> String {
    "/var/log/steward".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
