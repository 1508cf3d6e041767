//! Output guard
//!
//! Computes the output path of a source file (`<dir>/clean-<name>`) and refuses
//! to process a file that is already an output, or whose output already exists.
//! The check runs once per file before any row is read.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default marker prefixed to output file names
pub const DEFAULT_OUTPUT_PREFIX: &str = "clean-";

/// Reason a source file is skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardRejection {
    /// The file name already carries the output marker
    AlreadyAnonymized,
    /// A file already exists at the output path
    OutputExists(PathBuf),
    /// The path has no file name component
    NoFileName,
}

impl fmt::Display for GuardRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardRejection::AlreadyAnonymized => write!(f, "file is already anonymized"),
            GuardRejection::OutputExists(path) => {
                write!(f, "output file {} already exists", path.display())
            }
            GuardRejection::NoFileName => write!(f, "path has no file name"),
        }
    }
}

/// Outcome of the guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Transform may run and write to this path
    Proceed(PathBuf),
    /// Transform must not run
    Reject(GuardRejection),
}

/// Idempotency check on output file names
#[derive(Debug, Clone)]
pub struct OutputGuard {
    prefix: String,
}

impl OutputGuard {
    /// Creates a guard using `prefix` as the output marker
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Output marker
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Output path for `input`: same directory, marker prepended to the file name
    ///
    /// # Examples
    ///
    /// ```
    /// use telclean::core::guard::OutputGuard;
    /// use std::path::{Path, PathBuf};
    ///
    /// let guard = OutputGuard::default();
    /// assert_eq!(
    ///     guard.output_path(Path::new("exports/entrant-2024.csv")),
    ///     Some(PathBuf::from("exports/clean-entrant-2024.csv"))
    /// );
    /// ```
    pub fn output_path(&self, input: &Path) -> Option<PathBuf> {
        let file_name = input.file_name()?;
        let mut name = OsString::from(&self.prefix);
        name.push(file_name);
        Some(match input.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        })
    }

    /// Decides whether `input` may be transformed
    pub fn check(&self, input: &Path) -> GuardDecision {
        let Some(file_name) = input.file_name() else {
            return GuardDecision::Reject(GuardRejection::NoFileName);
        };

        if file_name.to_string_lossy().contains(&self.prefix) {
            return GuardDecision::Reject(GuardRejection::AlreadyAnonymized);
        }

        match self.output_path(input) {
            Some(output) if output.exists() => {
                GuardDecision::Reject(GuardRejection::OutputExists(output))
            }
            Some(output) => GuardDecision::Proceed(output),
            None => GuardDecision::Reject(GuardRejection::NoFileName),
        }
    }
}

impl Default for OutputGuard {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_without_directory() {
        let guard = OutputGuard::default();
        assert_eq!(
            guard.output_path(Path::new("calls.csv")),
            Some(PathBuf::from("clean-calls.csv"))
        );
    }

    #[test]
    fn test_output_path_custom_prefix() {
        let guard = OutputGuard::new("anon_");
        assert_eq!(
            guard.output_path(Path::new("/data/calls.csv")),
            Some(PathBuf::from("/data/anon_calls.csv"))
        );
    }

    #[test]
    fn test_rejects_already_clean_name() {
        let guard = OutputGuard::default();
        assert_eq!(
            guard.check(Path::new("/data/clean-calls.csv")),
            GuardDecision::Reject(GuardRejection::AlreadyAnonymized)
        );
        // Marker anywhere in the name counts
        assert_eq!(
            guard.check(Path::new("/data/copy-of-clean-calls.csv")),
            GuardDecision::Reject(GuardRejection::AlreadyAnonymized)
        );
    }

    #[test]
    fn test_rejects_existing_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("calls.csv");
        let output = dir.path().join("clean-calls.csv");
        fs::write(&input, "a;b\r\n").unwrap();

        assert_eq!(guard_check(&input), GuardDecision::Proceed(output.clone()));

        fs::write(&output, "a;b\r\n").unwrap();
        assert_eq!(
            guard_check(&input),
            GuardDecision::Reject(GuardRejection::OutputExists(output))
        );
    }

    #[test]
    fn test_rejects_path_without_file_name() {
        let guard = OutputGuard::default();
        assert_eq!(
            guard.check(Path::new("/")),
            GuardDecision::Reject(GuardRejection::NoFileName)
        );
    }

    #[test]
    fn test_rejection_display() {
        assert_eq!(
            GuardRejection::AlreadyAnonymized.to_string(),
            "file is already anonymized"
        );
    }

    fn guard_check(input: &Path) -> GuardDecision {
        OutputGuard::default().check(input)
    }
}
