//! Configuration management for telclean.
//!
//! telclean reads an optional TOML file (`telclean.toml` in the working
//! directory, or the file named by `--config` / `TELCLEAN_CONFIG`) with support
//! for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `TELCLEAN_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`InputConfig`] - delimiter, encoding, initial header width
//! - [`OutputConfig`] - output file name marker
//! - [`DictionaryConfig`] - dictionary file location
//! - `profiles` - file-name markers and their columns (folder mode)
//! - [`LoggingConfig`] - local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [input]
//! delimiter = ";"
//! encoding = "windows-1252"
//! default_column_count = 4
//!
//! [output]
//! prefix = "clean-"
//!
//! [dictionary]
//! path = "${TELCLEAN_HOME}/.dict.csv"
//!
//! [[profiles]]
//! marker = "entrant"
//! columns = [1, 2, 4]
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, CleanerConfig, DictionaryConfig, InputConfig, LoggingConfig, OutputConfig,
};
