//! Core business logic for telclean.
//!
//! # Modules
//!
//! - [`clean`] - Single file and folder runs, coordination and summary
//! - [`guard`] - Output naming and the already-anonymized check
//! - [`profile`] - Column selection from file-name markers
//! - [`transform`] - Row/column cursor and the substitution engine
//!
//! # Clean Workflow
//!
//! 1. **Load Dictionary**: Read `originalValue;pseudonym` records
//! 2. **Select Columns**: Explicit list, or a profile in folder mode
//! 3. **Guard**: Skip files that are outputs or already have one
//! 4. **Transform**: Substitute integer cells of selected columns outside row 0
//! 5. **Write**: `clean-<name>` next to the source
//! 6. **Save Dictionary**: Once, at the end of the run
//!
//! # Example
//!
//! ```rust,no_run
//! use telclean::config::CleanerConfig;
//! use telclean::core::clean::CleanCoordinator;
//! use telclean::domain::AnonymizedColumnSet;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CleanerConfig::default();
//! let mut coordinator = CleanCoordinator::new(&config)?;
//!
//! let summary = coordinator.clean_single(
//!     Path::new("appels-entrant.csv"),
//!     &AnonymizedColumnSet::from_indices([1, 2, 4]),
//! )?;
//!
//! println!("Cleaned: {}", summary.cleaned());
//! println!("Skipped: {}", summary.skipped());
//! # Ok(())
//! # }
//! ```

pub mod clean;
pub mod guard;
pub mod profile;
pub mod transform;
