//! Domain error types
//!
//! This module defines the error hierarchy for telclean.
//! Errors are domain-specific and don't expose third-party types.

use std::path::PathBuf;
use thiserror::Error;

/// Main telclean error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum CleanerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An explicitly named source file is missing or cannot be opened
    #[error("Source file not found or unreadable: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Delimited-text framing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Text could not be represented in the configured encoding
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Row/column engine misuse
    #[error("Transform error: {0}")]
    Transform(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl CleanerError {
    /// Process exit code associated with this error when it ends the run
    pub fn exit_code(&self) -> i32 {
        match self {
            CleanerError::Configuration(_) => 2,
            CleanerError::SourceNotFound(_) => 3,
            _ => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CleanerError {
    fn from(err: std::io::Error) -> Self {
        CleanerError::Io(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for CleanerError {
    fn from(err: csv::Error) -> Self {
        CleanerError::Csv(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CleanerError {
    fn from(err: toml::de::Error) -> Self {
        CleanerError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaner_error_display() {
        let err = CleanerError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_source_not_found_display() {
        let err = CleanerError::SourceNotFound(PathBuf::from("data/calls.csv"));
        assert_eq!(
            err.to_string(),
            "Source file not found or unreadable: data/calls.csv"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CleanerError::Configuration("x".into()).exit_code(), 2);
        assert_eq!(CleanerError::SourceNotFound(PathBuf::new()).exit_code(), 3);
        assert_eq!(CleanerError::Io("x".into()).exit_code(), 5);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: CleanerError = io_err.into();
        assert!(matches!(err, CleanerError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: CleanerError = toml_err.into();
        assert!(matches!(err, CleanerError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_cleaner_error_implements_std_error() {
        let err = CleanerError::Transform("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
