// telclean - Phone number pseudonymization for delimited exports
// Copyright (c) 2025 Telclean Contributors
// Licensed under the MIT License

//! # telclean - Phone number pseudonymization
//!
//! telclean replaces phone numbers found in delimited exports of a telephony
//! system with stable pseudonyms, writing an anonymized copy next to each
//! source file.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Reading** `;`-delimited Windows-1252 files with ragged rows
//! - **Substituting** integer cells of chosen columns, header row excluded
//! - **Persisting** the value to pseudonym mapping across runs
//! - **Guarding** against re-processing outputs or overwriting them
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (clean runs, guard, profiles, transform)
//! - [`anonymization`] - Pseudonym encoding and the persistent dictionary
//! - [`adapters`] - Delimited file reading and writing
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use telclean::config::load_config_or_default;
//! use telclean::core::clean::CleanCoordinator;
//! use telclean::domain::AnonymizedColumnSet;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default(None)?;
//!     let mut coordinator = CleanCoordinator::new(&config)?;
//!
//!     let summary = coordinator.clean_folder(
//!         Path::new("exports"),
//!         &AnonymizedColumnSet::from_indices([0]),
//!     )?;
//!
//!     println!("Cleaned {} files", summary.cleaned());
//!     Ok(())
//! }
//! ```
//!
//! ## Pseudonyms
//!
//! The n-th distinct number gets `xxx` followed by n written in base 26 with
//! letters, padded to three letters. The same number always maps to the same
//! pseudonym for as long as the dictionary file is kept:
//!
//! ```rust
//! use telclean::anonymization::PseudonymDictionary;
//!
//! let mut dictionary = PseudonymDictionary::in_memory();
//! assert_eq!(dictionary.anonymize("5551234"), "xxxaaa");
//! assert_eq!(dictionary.anonymize("5559876"), "xxxaab");
//! assert_eq!(dictionary.anonymize("5551234"), "xxxaaa");
//! assert_eq!(dictionary.anonymize("n/a"), "n/a");
//! ```
//!
//! ## Error Handling
//!
//! telclean uses the [`domain::CleanerError`] type for all library errors. Each
//! error maps to a process exit code through [`domain::CleanerError::exit_code`].

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
