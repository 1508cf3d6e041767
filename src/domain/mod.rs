//! Domain types for telclean.
//!
//! The domain layer provides:
//! - **Error types** ([`CleanerError`])
//! - **Result type alias** ([`Result`])
//! - **Column selection** ([`AnonymizedColumnSet`])
//!
//! ```rust
//! use telclean::domain::{AnonymizedColumnSet, Result};
//!
//! fn example() -> Result<()> {
//!     let columns = AnonymizedColumnSet::from_indices([1, 2, 1]);
//!     assert_eq!(columns.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod columns;
pub mod errors;
pub mod result;

pub use columns::AnonymizedColumnSet;
pub use errors::CleanerError;
pub use result::Result;
