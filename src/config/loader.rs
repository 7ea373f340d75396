//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::StewardConfig;
use super::secret::secret_string;
use crate::domain::errors::StewardError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`StewardConfig`]
/// 4. Applies environment variable overrides (`STEWARD_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file is missing or unreadable, a
/// referenced variable is unset, the TOML is malformed, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use steward::config::loader::load_config;
///
/// let config = load_config("steward.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<StewardConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StewardError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        StewardError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: StewardConfig = toml::from_str(&contents)
        .map_err(|e| StewardError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        StewardError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(StewardError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_bool_override(name: &str, value: &str) -> Result<bool> {
    value.parse().map_err(|_| {
        StewardError::Configuration(format!("{name} must be 'true' or 'false', got '{value}'"))
    })
}

fn parse_number_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| StewardError::Configuration(format!("{name} must be a number, got '{value}'")))
}

/// Splits a comma-separated override into trimmed, non-empty names
fn parse_list_override(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Applies environment variable overrides using the `STEWARD_*` prefix
///
/// Environment variables follow the pattern `STEWARD_<SECTION>_<KEY>`,
/// for example `STEWARD_CATALOG_BASE_URL` or `STEWARD_EXPORT_INCLUDE_ASSETS`.
fn apply_env_overrides(config: &mut StewardConfig) -> Result<()> {
    let var = |name: &str| std::env::var(name).ok();

    // Application overrides
    if let Some(val) = var("STEWARD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = var("STEWARD_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_bool_override("STEWARD_APPLICATION_DRY_RUN", &val)?;
    }

    // Catalog overrides
    if let Some(val) = var("STEWARD_CATALOG_BASE_URL") {
        config.catalog.base_url = val;
    }
    if let Some(val) = var("STEWARD_CATALOG_USERNAME") {
        config.catalog.username = Some(val);
    }
    if let Some(val) = var("STEWARD_CATALOG_PASSWORD") {
        config.catalog.password = Some(secret_string(val));
    }
    if let Some(val) = var("STEWARD_CATALOG_AUTH_TYPE") {
        config.catalog.auth_type = val;
    }
    if let Some(val) = var("STEWARD_CATALOG_TLS_VERIFY") {
        config.catalog.tls_verify = parse_bool_override("STEWARD_CATALOG_TLS_VERIFY", &val)?;
    }
    if let Some(val) = var("STEWARD_CATALOG_PAGE_SIZE") {
        config.catalog.page_size = parse_number_override("STEWARD_CATALOG_PAGE_SIZE", &val)?;
    }
    if let Some(val) = var("STEWARD_CATALOG_TIMEOUT_SECONDS") {
        config.catalog.timeout_seconds =
            parse_number_override("STEWARD_CATALOG_TIMEOUT_SECONDS", &val)?;
    }

    // Export overrides
    if let Some(val) = var("STEWARD_EXPORT_COMMUNITIES") {
        config.export.communities = parse_list_override(&val);
    }
    if let Some(val) = var("STEWARD_EXPORT_DOMAINS") {
        config.export.domains = parse_list_override(&val);
    }
    if let Some(val) = var("STEWARD_EXPORT_INCLUDE_ASSETS") {
        config.export.include_assets = parse_bool_override("STEWARD_EXPORT_INCLUDE_ASSETS", &val)?;
    }
    if let Some(val) = var("STEWARD_EXPORT_INCLUDE_ATTRIBUTES") {
        config.export.include_attributes =
            parse_bool_override("STEWARD_EXPORT_INCLUDE_ATTRIBUTES", &val)?;
    }
    if let Some(val) = var("STEWARD_EXPORT_INCLUDE_RELATIONS") {
        config.export.include_relations =
            parse_bool_override("STEWARD_EXPORT_INCLUDE_RELATIONS", &val)?;
    }
    if let Some(val) = var("STEWARD_EXPORT_INCLUDE_RESPONSIBILITIES") {
        config.export.include_responsibilities =
            parse_bool_override("STEWARD_EXPORT_INCLUDE_RESPONSIBILITIES", &val)?;
    }

    // Output overrides
    if let Some(val) = var("STEWARD_OUTPUT_DIRECTORY") {
        config.output.directory = PathBuf::from(val);
    }
    if let Some(val) = var("STEWARD_OUTPUT_FORMAT") {
        config.output.format = val.parse()?;
    }

    // Logging overrides
    if let Some(val) = var("STEWARD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool_override("STEWARD_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = var("STEWARD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
