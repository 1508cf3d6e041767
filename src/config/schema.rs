//! Configuration schema types
//!
//! This module defines the configuration structure mapped to `telclean.toml`.
//! Every section is optional; missing values take the defaults below.

use crate::adapters::delimited::{self, DelimitedFormat, DEFAULT_ENCODING};
use crate::anonymization::dictionary::DEFAULT_DICTIONARY_PATH;
use crate::core::guard::DEFAULT_OUTPUT_PREFIX;
use crate::core::profile::{builtin_profiles, ColumnProfile};
use crate::domain::result::Result as CleanerResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "telclean.toml";

/// Initial column count of the header row
pub const DEFAULT_COLUMN_COUNT: usize = 4;

/// Main telclean configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Source file framing
    #[serde(default)]
    pub input: InputConfig,

    /// Output file naming
    #[serde(default)]
    pub output: OutputConfig,

    /// Pseudonym dictionary location
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Column profiles used in folder mode, in matching order
    #[serde(default = "builtin_profiles")]
    pub profiles: Vec<ColumnProfile>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CleanerConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.input.validate()?;
        self.output.validate()?;
        for (position, profile) in self.profiles.iter().enumerate() {
            if profile.marker.is_empty() {
                return Err(format!("profiles[{position}].marker cannot be empty"));
            }
        }
        self.logging.validate()?;
        Ok(())
    }
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            application: ApplicationConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            dictionary: DictionaryConfig::default(),
            profiles: builtin_profiles(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Source file framing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Field delimiter, a single ASCII character
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Encoding label shared by sources, outputs and the dictionary
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Initial width of the header row
    #[serde(default = "default_column_count")]
    pub default_column_count: usize,
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        delimited::parse_delimiter(&self.delimiter).map_err(|e| e.to_string())?;
        delimited::resolve_encoding(&self.encoding).map_err(|e| e.to_string())?;
        if self.default_column_count == 0 {
            return Err("input.default_column_count must be at least 1".to_string());
        }
        Ok(())
    }

    /// Builds the delimited format described by this section
    pub fn format(&self) -> CleanerResult<DelimitedFormat> {
        DelimitedFormat::from_labels(&self.delimiter, &self.encoding)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            encoding: default_encoding(),
            default_column_count: default_column_count(),
        }
    }
}

/// Output file naming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Marker prefixed to output file names
    #[serde(default = "default_output_prefix")]
    pub prefix: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.prefix.is_empty() {
            return Err("output.prefix cannot be empty".to_string());
        }
        if self.prefix.contains(['/', '\\']) {
            return Err(format!(
                "output.prefix '{}' cannot contain path separators",
                self.prefix
            ));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: default_output_prefix(),
        }
    }
}

/// Pseudonym dictionary location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Dictionary file; an empty path keeps the dictionary in memory only
    #[serde(default = "default_dictionary_path")]
    pub path: PathBuf,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: default_dictionary_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory of the log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_delimiter() -> String {
    (delimited::DEFAULT_DELIMITER as char).to_string()
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

fn default_column_count() -> usize {
    DEFAULT_COLUMN_COUNT
}

fn default_output_prefix() -> String {
    DEFAULT_OUTPUT_PREFIX.to_string()
}

fn default_dictionary_path() -> PathBuf {
    PathBuf::from(DEFAULT_DICTIONARY_PATH)
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
