//! Integration tests for configuration loading and validation
//!
//! Every test holds `ENV_MUTEX`: the loader reads `STEWARD_*` variables and
//! tests in this binary run in parallel.

use secrecy::ExposeSecret;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use steward::config::{load_config, Environment};
use steward::domain::OutputFormat;
use tempfile::NamedTempFile;

// Mutex to serialize tests that read or modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn lock_env() -> MutexGuard<'static, ()> {
    let guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    guard
}

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for name in [
        "STEWARD_APPLICATION_LOG_LEVEL",
        "STEWARD_APPLICATION_DRY_RUN",
        "STEWARD_CATALOG_PAGE_SIZE",
        "STEWARD_EXPORT_COMMUNITIES",
        "STEWARD_EXPORT_INCLUDE_RELATIONS",
        "STEWARD_OUTPUT_FORMAT",
        "TEST_CATALOG_PASSWORD",
    ] {
        std::env::remove_var(name);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = lock_env();
    let temp_file = write_config(
        r#"
environment = "staging"

[application]
log_level = "debug"
dry_run = true

[catalog]
base_url = "https://catalog.example.com"
auth_type = "basic"
username = "svc_export"
password = "test_pass"
tls_verify = false
timeout_seconds = 30
page_size = 250

[catalog.retry]
max_retries = 5
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 1.5

[export]
communities = ["Finance", "Human Resources"]
domains = ["Glossary"]
all_roots = false
include_assets = true
include_attributes = true
include_relations = false
include_responsibilities = true

[output]
directory = "/tmp/steward-export"
format = "jsonl"

[logging]
local_enabled = false
local_path = "/tmp/steward"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.environment, Environment::Staging);
    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);

    assert_eq!(config.catalog.base_url, "https://catalog.example.com");
    assert_eq!(config.catalog.username, Some("svc_export".to_string()));
    assert_eq!(
        config
            .catalog
            .password
            .as_ref()
            .map(|p| p.expose_secret().as_str().to_string()),
        Some("test_pass".to_string())
    );
    assert!(!config.catalog.tls_verify);
    assert_eq!(config.catalog.timeout_seconds, 30);
    assert_eq!(config.catalog.page_size, 250);
    assert_eq!(config.catalog.retry.max_retries, 5);
    assert_eq!(config.catalog.retry.backoff_multiplier, 1.5);

    assert_eq!(config.export.communities.len(), 2);
    assert_eq!(config.export.domains, vec!["Glossary".to_string()]);
    assert!(!config.export.include_relations);

    assert_eq!(config.output.directory, PathBuf::from("/tmp/steward-export"));
    assert_eq!(config.output.format, OutputFormat::Jsonl);

    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");

    let options = config.export_options();
    assert!(options.include_assets);
    assert!(!options.include_relations);
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = lock_env();
    let temp_file = write_config(
        r#"
[catalog]
base_url = "https://catalog.example.com"
username = "user"
password = "pass"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.dry_run);
    assert_eq!(config.catalog.auth_type, "basic");
    assert!(config.catalog.tls_verify);
    assert_eq!(config.catalog.page_size, 1000);
    assert_eq!(config.catalog.retry.max_retries, 3);
    assert!(!config.export.has_selection());
    assert!(config.export.include_assets);
    assert!(config.export.include_attributes);
    assert!(config.export.include_relations);
    assert!(config.export.include_responsibilities);
    assert_eq!(config.output.directory, PathBuf::from("export"));
    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = lock_env();
    std::env::set_var("TEST_CATALOG_PASSWORD", "secret_pass");

    let temp_file = write_config(
        r#"
[catalog]
base_url = "https://catalog.example.com"
username = "user"
password = "${TEST_CATALOG_PASSWORD}"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(
        config.catalog.password.as_ref().unwrap().expose_secret().as_str(),
        "secret_pass"
    );

    std::env::remove_var("TEST_CATALOG_PASSWORD");
}

#[test]
fn test_missing_env_var_is_reported() {
    let _lock = lock_env();

    let temp_file = write_config(
        r#"
[catalog]
base_url = "https://catalog.example.com"
username = "user"
password = "${TEST_CATALOG_PASSWORD}"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_CATALOG_PASSWORD"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = lock_env();
    std::env::set_var("STEWARD_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("STEWARD_CATALOG_PAGE_SIZE", "200");
    std::env::set_var("STEWARD_EXPORT_COMMUNITIES", "Finance, Risk");
    std::env::set_var("STEWARD_EXPORT_INCLUDE_RELATIONS", "false");
    std::env::set_var("STEWARD_OUTPUT_FORMAT", "jsonl");

    let temp_file = write_config(
        r#"
[application]
log_level = "info"

[catalog]
base_url = "https://catalog.example.com"
username = "user"
password = "pass"
page_size = 500

[export]
communities = ["HR"]
"#,
    );

    let result = load_config(temp_file.path());
    cleanup_env_vars();
    let config = result.expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.catalog.page_size, 200);
    assert_eq!(
        config.export.communities,
        vec!["Finance".to_string(), "Risk".to_string()]
    );
    assert!(!config.export.include_relations);
    assert_eq!(config.output.format, OutputFormat::Jsonl);
}

#[test]
fn test_invalid_log_level_rejected() {
    let _lock = lock_env();
    let temp_file = write_config(
        r#"
[application]
log_level = "invalid_level"

[catalog]
base_url = "https://catalog.example.com"
username = "user"
password = "pass"
"#,
    );

    assert!(load_config(temp_file.path()).is_err());
}

#[test]
fn test_page_size_above_maximum_rejected() {
    let _lock = lock_env();
    let temp_file = write_config(
        r#"
[catalog]
base_url = "https://catalog.example.com"
username = "user"
password = "pass"
page_size = 1001
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("page_size"));
}

#[test]
fn test_production_requires_tls_verification() {
    let _lock = lock_env();
    let temp_file = write_config(
        r#"
environment = "production"

[catalog]
base_url = "https://catalog.example.com"
username = "user"
password = "pass"
tls_verify = false
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TLS"));
}

#[test]
fn test_basic_auth_requires_credentials() {
    let _lock = lock_env();
    let temp_file = write_config(
        r#"
[catalog]
base_url = "https://catalog.example.com"
"#,
    );

    assert!(load_config(temp_file.path()).is_err());

    let anonymous = write_config(
        r#"
[catalog]
base_url = "https://catalog.example.com"
auth_type = "none"
"#,
    );
    assert!(load_config(anonymous.path()).is_ok());
}
