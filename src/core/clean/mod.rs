//! Clean workflow
//!
//! Drives single file and folder runs: column selection, the output guard, the
//! row transform, and the single dictionary save at the end of the run.

pub mod coordinator;
pub mod file;
pub mod summary;

pub use coordinator::CleanCoordinator;
pub use file::{FileCleaner, FileOutcome, FileReport, SkipReason};
pub use summary::CleanSummary;
