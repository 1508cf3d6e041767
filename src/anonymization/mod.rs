//! Pseudonymization of phone-number cells
//!
//! # Architecture
//!
//! - **Generator** ([`pseudonym`]): ordinal to `xxx`-prefixed base-26 string
//! - **Dictionary** ([`dictionary`]): persistent original value to pseudonym mapping
//!
//! The transform engine only sees the [`Anonymizer`] trait, so it can run against
//! the persistent dictionary or against a test double.
//!
//! # Usage
//!
//! ```rust
//! use telclean::anonymization::PseudonymDictionary;
//!
//! let mut dictionary = PseudonymDictionary::in_memory();
//! assert_eq!(dictionary.anonymize("5551234"), "xxxaaa");
//! assert_eq!(dictionary.anonymize("abc"), "abc");
//! ```

pub mod dictionary;
pub mod pseudonym;

pub use dictionary::PseudonymDictionary;

/// Replacement policy applied to selected cells
pub trait Anonymizer {
    /// Returns the value to write in place of `value`
    fn anonymize(&mut self, value: &str) -> String;
}
