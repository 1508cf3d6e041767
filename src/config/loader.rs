//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{CleanerConfig, DEFAULT_CONFIG_PATH};
use crate::domain::errors::CleanerError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CleanerConfig
/// 4. Applies environment variable overrides (TELCLEAN_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable, if a referenced
/// variable is unset, if parsing fails, or if validation fails.
///
/// # Examples
///
/// ```no_run
/// use telclean::config::loader::load_config;
///
/// let config = load_config("telclean.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CleanerConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CleanerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CleanerError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: CleanerConfig = toml::from_str(&contents)
        .map_err(|e| CleanerError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(config)
}

/// Loads the explicitly named file, or the default file if present, or defaults
///
/// An explicit path must exist. The implicit [`DEFAULT_CONFIG_PATH`] is optional:
/// when absent, built-in defaults are used. Environment overrides and
/// validation apply in every case.
pub fn load_config_or_default(explicit: Option<&str>) -> Result<CleanerConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        return load_config(default_path);
    }

    finish(CleanerConfig::default())
}

fn finish(mut config: CleanerConfig) -> Result<CleanerConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        CleanerError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CleanerError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
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
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CleanerError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the TELCLEAN_* prefix
///
/// Variables follow the pattern TELCLEAN_<SECTION>_<KEY>, for example
/// TELCLEAN_DICTIONARY_PATH or TELCLEAN_INPUT_DELIMITER.
fn apply_env_overrides(config: &mut CleanerConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("TELCLEAN_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Input overrides
    if let Ok(val) = std::env::var("TELCLEAN_INPUT_DELIMITER") {
        config.input.delimiter = val;
    }
    if let Ok(val) = std::env::var("TELCLEAN_INPUT_ENCODING") {
        config.input.encoding = val;
    }
    if let Ok(val) = std::env::var("TELCLEAN_INPUT_DEFAULT_COLUMN_COUNT") {
        config.input.default_column_count = val.parse().map_err(|_| {
            CleanerError::Configuration(format!(
                "Invalid TELCLEAN_INPUT_DEFAULT_COLUMN_COUNT value: {val}"
            ))
        })?;
    }

    // Output overrides
    if let Ok(val) = std::env::var("TELCLEAN_OUTPUT_PREFIX") {
        config.output.prefix = val;
    }

    // Dictionary overrides
    if let Ok(val) = std::env::var("TELCLEAN_DICTIONARY_PATH") {
        config.dictionary.path = PathBuf::from(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("TELCLEAN_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TELCLEAN_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("TELCLEAN_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("TELCLEAN_TEST_DICT_DIR", "/srv/telclean");
        let input = "path = \"${TELCLEAN_TEST_DICT_DIR}/.dict.csv\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result.trim_end(), "path = \"/srv/telclean/.dict.csv\"");
        std::env::remove_var("TELCLEAN_TEST_DICT_DIR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("TELCLEAN_TEST_MISSING_VAR");
        let input = "path = \"${TELCLEAN_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("TELCLEAN_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("TELCLEAN_TEST_COMMENTED_VAR");
        let input = "# path = \"${TELCLEAN_TEST_COMMENTED_VAR}\"\nprefix = \"clean-\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${TELCLEAN_TEST_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-telclean.toml");
        assert!(matches!(result, Err(CleanerError::Configuration(_))));
    }

    #[test]
    fn test_load_config_or_default_explicit_missing() {
        let result = load_config_or_default(Some("nonexistent-telclean.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[input]
delimiter = ","
encoding = "utf-8"
default_column_count = 6

[output]
prefix = "anon-"

[dictionary]
path = "/tmp/telclean/.dict.csv"

[[profiles]]
marker = "entrant"
columns = [1, 2]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.input.delimiter, ",");
        assert_eq!(config.input.default_column_count, 6);
        assert_eq!(config.output.prefix, "anon-");
        assert_eq!(config.profiles.len(), 1);
        assert_eq!(config.profiles[0].columns.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_load_config_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[input]\ndelimiter = \"ab\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }
}
