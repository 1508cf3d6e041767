//! Column selection by file name
//!
//! Exports of the telephony system are named after their call direction. Each
//! profile pairs a marker found in the file name with the columns holding
//! phone numbers in that kind of export. The first matching profile wins; a file
//! matching none uses the caller's default columns.

use crate::domain::columns::AnonymizedColumnSet;
use serde::{Deserialize, Serialize};

/// File-name marker and the columns it selects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Substring searched in the file name
    pub marker: String,

    /// Columns to anonymize for matching files
    pub columns: AnonymizedColumnSet,
}

impl ColumnProfile {
    /// Creates a profile
    pub fn new(marker: impl Into<String>, columns: impl IntoIterator<Item = usize>) -> Self {
        Self {
            marker: marker.into(),
            columns: AnonymizedColumnSet::from_indices(columns),
        }
    }

    /// Returns true if `file_name` contains the marker
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.contains(&self.marker)
    }
}

/// Built-in profiles, in matching order
pub fn builtin_profiles() -> Vec<ColumnProfile> {
    vec![
        ColumnProfile::new("entrant", [1, 2, 4]),
        ColumnProfile::new("sortant", [0]),
        ColumnProfile::new("interne", [0, 1, 2, 3]),
    ]
}

/// Ordered profile lookup with a fallback column set
#[derive(Debug, Clone)]
pub struct ColumnPolicy {
    profiles: Vec<ColumnProfile>,
    fallback: AnonymizedColumnSet,
}

impl ColumnPolicy {
    /// Creates a policy
    pub fn new(profiles: Vec<ColumnProfile>, fallback: AnonymizedColumnSet) -> Self {
        Self { profiles, fallback }
    }

    /// First profile matching `file_name`
    pub fn profile_for(&self, file_name: &str) -> Option<&ColumnProfile> {
        self.profiles.iter().find(|p| p.matches(file_name))
    }

    /// Columns to anonymize for `file_name`
    ///
    /// # Examples
    ///
    /// ```
    /// use telclean::core::profile::{builtin_profiles, ColumnPolicy};
    /// use telclean::domain::AnonymizedColumnSet;
    ///
    /// let policy = ColumnPolicy::new(builtin_profiles(), AnonymizedColumnSet::from_indices([7]));
    /// assert_eq!(policy.select("appels-entrant-06.csv").as_slice(), &[1, 2, 4]);
    /// assert_eq!(policy.select("annuaire.csv").as_slice(), &[7]);
    /// ```
    pub fn select(&self, file_name: &str) -> &AnonymizedColumnSet {
        self.profile_for(file_name)
            .map(|p| &p.columns)
            .unwrap_or(&self.fallback)
    }

    /// Fallback column set
    pub fn fallback(&self) -> &AnonymizedColumnSet {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("entrant.csv", &[1, 2, 4] ; "incoming")]
    #[test_case("2024-sortant.csv", &[0] ; "outgoing")]
    #[test_case("interne_mars.csv", &[0, 1, 2, 3] ; "internal")]
    #[test_case("inventaire.csv", &[9] ; "no marker uses fallback")]
    fn test_builtin_selection(file_name: &str, expected: &[usize]) {
        let policy = ColumnPolicy::new(builtin_profiles(), AnonymizedColumnSet::from_indices([9]));
        assert_eq!(policy.select(file_name).as_slice(), expected);
    }

    #[test]
    fn test_first_match_wins() {
        let policy = ColumnPolicy::new(builtin_profiles(), AnonymizedColumnSet::new());
        // Both "entrant" and "sortant" occur; "entrant" is checked first
        let selected = policy.select("sortant-vs-entrant.csv");
        assert_eq!(selected.as_slice(), &[1, 2, 4]);
    }

    #[test]
    fn test_case_sensitive_marker() {
        let policy = ColumnPolicy::new(builtin_profiles(), AnonymizedColumnSet::new());
        assert!(policy.profile_for("ENTRANT.csv").is_none());
        assert!(policy.select("ENTRANT.csv").is_empty());
    }

    #[test]
    fn test_custom_profiles() {
        let policy = ColumnPolicy::new(
            vec![ColumnProfile::new("sms", [3, 3, 5])],
            AnonymizedColumnSet::new(),
        );
        assert_eq!(policy.select("sms-log.csv").as_slice(), &[3, 5]);
        assert!(policy.select("entrant.csv").is_empty());
    }
}
