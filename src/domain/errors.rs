//! Domain error types
//!
//! This module defines the error hierarchy for Steward. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Steward error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum StewardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Remote catalog errors (transport, status, payload)
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A name-based lookup matched nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// The community listing does not form a forest
    #[error("Malformed hierarchy: {0}")]
    MalformedHierarchy(String),

    /// Output sink errors
    #[error("Output error: {0}")]
    Output(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl StewardError {
    /// Returns true for the "nothing matched" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, StewardError::NotFound(_))
    }
}

/// Remote catalog errors
///
/// Errors that occur when talking to the catalog REST API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to connect to the catalog server
    #[error("Failed to connect to catalog server: {0}")]
    ConnectionFailed(String),

    /// Credentials rejected (401/403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid response from server
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded (429)
    #[error("Rate limit exceeded, retry after: {0}")]
    RateLimitExceeded(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl CatalogError {
    /// Whether the transport may succeed on a later attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CatalogError::ConnectionFailed(_)
                | CatalogError::RateLimitExceeded(_)
                | CatalogError::ServerError { .. }
                | CatalogError::Timeout(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for StewardError {
    fn from(err: std::io::Error) -> Self {
        StewardError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for StewardError {
    fn from(err: serde_json::Error) -> Self {
        StewardError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for StewardError {
    fn from(err: toml::de::Error) -> Self {
        StewardError::Configuration(format!("TOML parse error: {err}"))
    }
}
