//! Integration tests for logging functionality

use steward::config::LoggingConfig;
use steward::domain::StewardError;
use steward::logging::structured::LOG_FILE_NAME;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "/var/log/steward");
}

#[test]
fn test_console_only_config() {
    let config = LoggingConfig::console_only();
    assert!(!config.local_enabled);
    assert!(config.local_path.is_empty());
}

#[test]
fn test_log_file_name() {
    assert_eq!(LOG_FILE_NAME, "steward.log");
}

// init_logging installs a global subscriber, which can happen once per
// process; this is the only test in the binary that calls it.
#[test]
fn test_init_logging_creates_directory_and_rejects_second_init() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };
    assert!(!log_path.exists());

    let guard = steward::logging::init_logging("debug", &config).unwrap();
    assert!(guard.has_file_output());
    assert!(log_path.exists());

    let second = steward::logging::init_logging("info", &LoggingConfig::console_only());
    assert!(matches!(second, Err(StewardError::Configuration(_))));

    drop(guard);

    let log_file = log_path.join(LOG_FILE_NAME);
    let contents = std::fs::read_to_string(log_file).unwrap();
    assert!(contents.contains("Logging initialized"));
}

#[test]
fn test_invalid_log_level_rejected() {
    let result = steward::logging::init_logging("verbose", &LoggingConfig::console_only());
    assert!(matches!(result, Err(StewardError::Configuration(_))));
}
