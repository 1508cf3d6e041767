//! External integrations
//!
//! - [`delimited`] - delimited text files (CSV framing and legacy encodings)

pub mod delimited;

pub use delimited::DelimitedFormat;
