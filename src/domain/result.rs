//! Result type alias for Steward

use super::errors::StewardError;

/// Result type alias for Steward operations
///
/// # Examples
///
/// ```
/// use steward::domain::result::Result;
/// use steward::domain::errors::StewardError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(StewardError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, StewardError>;
