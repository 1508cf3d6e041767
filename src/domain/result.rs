//! Result type alias for telclean

use super::errors::CleanerError;

/// Result type alias for telclean operations
///
/// # Examples
///
/// ```
/// use telclean::domain::result::Result;
/// use telclean::domain::errors::CleanerError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CleanerError::Transform("no current row".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CleanerError>;
