//! CLI command implementations

pub mod clean;
