//! Anonymized column set
//!
//! This module provides the newtype describing which 0-based column indices
//! are subject to substitution.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Set of 0-based column indices eligible for substitution
///
/// Duplicates collapse on construction while the first-occurrence order is kept,
/// so status output reflects what the caller asked for.
///
/// # Examples
///
/// ```
/// use telclean::domain::columns::AnonymizedColumnSet;
///
/// let columns = AnonymizedColumnSet::from_indices([4, 1, 4, 2]);
/// assert_eq!(columns.as_slice(), &[4, 1, 2]);
/// assert!(columns.contains(1));
/// assert!(!columns.contains(0));
/// assert_eq!(columns.to_string(), "[4, 1, 2]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct AnonymizedColumnSet(Vec<usize>);

impl AnonymizedColumnSet {
    /// Creates an empty set (no column is ever substituted)
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a set from indices, dropping duplicates
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut unique = Vec::new();
        for index in indices {
            if !unique.contains(&index) {
                unique.push(index);
            }
        }
        Self(unique)
    }

    /// Returns true if `column` is selected
    pub fn contains(&self, column: usize) -> bool {
        self.0.contains(&column)
    }

    /// Number of distinct selected columns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no column is selected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected indices in first-occurrence order
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for AnonymizedColumnSet {
    fn from(indices: Vec<usize>) -> Self {
        Self::from_indices(indices)
    }
}

impl From<AnonymizedColumnSet> for Vec<usize> {
    fn from(set: AnonymizedColumnSet) -> Self {
        set.0
    }
}

impl fmt::Display for AnonymizedColumnSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl FromStr for AnonymizedColumnSet {
    type Err = String;

    /// Parses a comma and/or whitespace separated list such as `"1, 2 4"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut indices = Vec::new();
        for token in s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let index = token
                .parse::<usize>()
                .map_err(|_| format!("Invalid column index '{token}'"))?;
            indices.push(index);
        }
        Ok(Self::from_indices(indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_contains_nothing() {
        let columns = AnonymizedColumnSet::new();
        assert!(columns.is_empty());
        assert!(!columns.contains(0));
    }

    #[test]
    fn test_duplicates_collapse_in_order() {
        let columns = AnonymizedColumnSet::from_indices([0, 7, 9, 7, 0]);
        assert_eq!(columns.as_slice(), &[0, 7, 9]);
        assert_eq!(columns.len(), 3);
    }

    #[test]
    fn test_from_str() {
        let columns: AnonymizedColumnSet = "1, 2 4,2".parse().unwrap();
        assert_eq!(columns.as_slice(), &[1, 2, 4]);
    }

    #[test]
    fn test_from_str_rejects_negative() {
        assert!("1,-2".parse::<AnonymizedColumnSet>().is_err());
        assert!("a".parse::<AnonymizedColumnSet>().is_err());
    }

    #[test]
    fn test_deserialize_dedups() {
        #[derive(Deserialize)]
        struct Holder {
            columns: AnonymizedColumnSet,
        }

        let holder: Holder = toml::from_str("columns = [3, 3, 1]").unwrap();
        assert_eq!(holder.columns.as_slice(), &[3, 1]);
    }
}
