//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - JSON-formatted file logs with rotation
//! - Configurable log levels
//!
//! # Example
//!
//! ```no_run
//! use steward::logging::init_logging;
//! use steward::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a unit export
///
/// # Example
///
/// ```no_run
/// use steward::log_unit_start;
///
/// log_unit_start!("community", "Finance");
/// ```
#[macro_export]
macro_rules! log_unit_start {
    ($kind:expr, $name:expr) => {
        tracing::info!(
            unit_kind = %$kind,
            unit = %$name,
            "Starting unit export"
        );
    };
}

/// Log the completion of a unit export
///
/// # Example
///
/// ```no_run
/// use steward::log_unit_complete;
/// use std::time::Duration;
///
/// log_unit_complete!("Finance", 3, 42, Duration::from_secs(10));
/// ```
#[macro_export]
macro_rules! log_unit_complete {
    ($name:expr, $domains:expr, $assets:expr, $duration:expr) => {
        tracing::info!(
            unit = %$name,
            domains = $domains,
            assets = $assets,
            duration_ms = $duration.as_millis() as u64,
            "Unit export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use steward::log_error_with_context;
/// use steward::domain::StewardError;
///
/// let error = StewardError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use steward::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
