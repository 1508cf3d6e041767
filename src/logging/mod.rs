//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Human-readable console logs on stderr
//! - Configurable log levels (`--log-level`, config, or `RUST_LOG`)
//! - Optional JSON file logs with rotation
//!
//! # Example
//!
//! ```no_run
//! use telclean::logging::init_logging;
//! use telclean::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of one file
///
/// # Example
///
/// ```no_run
/// use telclean::log_file_cleaned;
/// use std::path::Path;
///
/// log_file_cleaned!(Path::new("clean-entrant.csv"), 5, 120);
/// ```
#[macro_export]
macro_rules! log_file_cleaned {
    ($output:expr, $columns:expr, $lines:expr) => {
        tracing::info!(
            output = %$output.display(),
            columns = $columns,
            lines = $lines,
            "File anonymized"
        );
    };
}

/// Log a skipped file with its reason
///
/// # Example
///
/// ```no_run
/// use telclean::log_file_skipped;
/// use std::path::Path;
///
/// log_file_skipped!(Path::new("clean-entrant.csv"), "file is already anonymized");
/// ```
#[macro_export]
macro_rules! log_file_skipped {
    ($source:expr, $reason:expr) => {
        tracing::warn!(
            source = %$source.display(),
            reason = %$reason,
            "File skipped"
        );
    };
}
