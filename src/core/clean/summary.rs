//! Clean summary and reporting
//!
//! Collects the outcome of every file of a run together with the state of the
//! dictionary once the run is over.

use super::file::FileOutcome;
use std::time::Duration;

/// Exit code of a run where every file was cleaned or skipped
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code of a run where at least one file failed
pub const EXIT_FILE_FAILURES: i32 = 1;

/// Summary of a clean run
#[derive(Debug, Clone)]
pub struct CleanSummary {
    /// Outcome of each file, in processing order
    pub outcomes: Vec<FileOutcome>,

    /// Entries read from the dictionary file at startup
    pub dictionary_loaded: usize,

    /// Entries in the dictionary at the end of the run
    pub dictionary_entries: usize,

    /// Entries minted during the run
    pub new_pseudonyms: usize,

    /// Whether the dictionary was written back
    pub dictionary_saved: bool,

    /// Why the dictionary could not be written back
    pub dictionary_error: Option<String>,

    /// Duration of the run
    pub duration: Duration,
}

impl CleanSummary {
    /// Create a new empty summary
    pub fn new(dictionary_loaded: usize) -> Self {
        Self {
            outcomes: Vec::new(),
            dictionary_loaded,
            dictionary_entries: dictionary_loaded,
            new_pseudonyms: 0,
            dictionary_saved: false,
            dictionary_error: None,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record the outcome of one file
    pub fn record(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of files considered
    pub fn files_seen(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of files written
    pub fn cleaned(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Cleaned(_)))
    }

    /// Number of files skipped
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    /// Number of files that failed
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }

    /// Check if the run was successful (no failed file)
    ///
    /// Skipped files and a dictionary that could not be saved do not count as
    /// failures.
    pub fn is_successful(&self) -> bool {
        self.failed() == 0
    }

    /// Process exit code for this run
    pub fn exit_code(&self) -> i32 {
        if self.is_successful() {
            EXIT_SUCCESS
        } else {
            EXIT_FILE_FAILURES
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            files = self.files_seen(),
            cleaned = self.cleaned(),
            skipped = self.skipped(),
            failed = self.failed(),
            new_pseudonyms = self.new_pseudonyms,
            dictionary_entries = self.dictionary_entries,
            dictionary_saved = self.dictionary_saved,
            duration_ms = self.duration.as_millis() as u64,
            "Clean completed"
        );

        if let Some(error) = &self.dictionary_error {
            tracing::warn!(error = %error, "Dictionary was not saved");
        }

        for outcome in &self.outcomes {
            if let FileOutcome::Failed { source, error } = outcome {
                tracing::warn!(source = %source.display(), error = %error, "File failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clean::file::SkipReason;
    use crate::core::guard::GuardRejection;
    use std::path::PathBuf;

    fn skipped() -> FileOutcome {
        FileOutcome::Skipped {
            source: PathBuf::from("clean-a.csv"),
            reason: SkipReason::Guard(GuardRejection::AlreadyAnonymized),
        }
    }

    fn failed() -> FileOutcome {
        FileOutcome::Failed {
            source: PathBuf::from("b.csv"),
            error: "boom".to_string(),
        }
    }

    #[test]
    fn test_empty_summary_is_successful() {
        let summary = CleanSummary::new(3);
        assert_eq!(summary.files_seen(), 0);
        assert_eq!(summary.dictionary_entries, 3);
        assert!(summary.is_successful());
        assert_eq!(summary.exit_code(), EXIT_SUCCESS);
    }

    #[test]
    fn test_skips_are_not_failures() {
        let mut summary = CleanSummary::new(0);
        summary.record(skipped());
        summary.record(skipped());
        assert_eq!(summary.skipped(), 2);
        assert_eq!(summary.exit_code(), EXIT_SUCCESS);
    }

    #[test]
    fn test_failure_sets_exit_code() {
        let mut summary = CleanSummary::new(0);
        summary.record(skipped());
        summary.record(failed());
        assert_eq!(summary.files_seen(), 2);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.is_successful());
        assert_eq!(summary.exit_code(), EXIT_FILE_FAILURES);
    }

    #[test]
    fn test_unsaved_dictionary_does_not_fail_run() {
        let mut summary = CleanSummary::new(0);
        summary.dictionary_error = Some("disk full".to_string());
        assert!(summary.is_successful());
    }

    #[test]
    fn test_with_duration() {
        let summary = CleanSummary::new(0).with_duration(Duration::from_millis(1500));
        assert_eq!(summary.duration, Duration::from_millis(1500));
    }
}
