//! Sequential pseudonym generation
//!
//! Turns a dictionary ordinal into a fixed-format alphabetic string:
//! the literal prefix `xxx` followed by the ordinal written in base 26 with
//! `a..z` as digits, most significant first, left-padded with `a` to at least
//! three digits.

/// Literal prefix of every pseudonym
pub const PREFIX: &str = "xxx";

/// Digit alphabet size
const BASE: usize = 26;

/// Minimum number of encoded digits after the prefix
const MIN_DIGITS: usize = 3;

/// Encodes an ordinal as a pseudonym
///
/// # Examples
///
/// ```
/// use telclean::anonymization::pseudonym::encode;
///
/// assert_eq!(encode(0), "xxxaaa");
/// assert_eq!(encode(1), "xxxaab");
/// assert_eq!(encode(26), "xxxaba");
/// assert_eq!(encode(26 * 26 * 26), "xxxbaaa");
/// ```
pub fn encode(ordinal: usize) -> String {
    // Least significant digit first; zero yields no digits before padding
    let mut digits = Vec::new();
    let mut rest = ordinal;
    while rest > 0 {
        digits.push(b'a' + (rest % BASE) as u8);
        rest /= BASE;
    }

    let padding = MIN_DIGITS.saturating_sub(digits.len());
    let mut pseudonym = String::with_capacity(PREFIX.len() + padding + digits.len());
    pseudonym.push_str(PREFIX);
    pseudonym.extend(std::iter::repeat('a').take(padding));
    pseudonym.extend(digits.iter().rev().map(|&d| d as char));
    pseudonym
}
