//! Integration tests for logging functionality
//!
//! A process can install its global subscriber only once, so a single test
//! initializes logging; the others stay on configuration values.

use telclean::config::LoggingConfig;
use telclean::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_is_rejected_before_install() {
    let config = LoggingConfig::default();
    let result = init_logging("chatty", &config);
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Invalid log level"));
    }
}

#[test]
fn test_file_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };
    assert!(!log_path.exists());

    let guard = init_logging("debug", &config).unwrap();
    tracing::info!(file = "entrant.csv", "File anonymized");
    drop(guard);

    assert!(log_path.is_dir());
    assert!(log_path.join("telclean.log").exists());
}
