//! Single file pipeline
//!
//! guard check → read rows → transform → write `clean-<name>`

use crate::adapters::delimited::DelimitedFormat;
use crate::anonymization::PseudonymDictionary;
use crate::core::guard::{GuardDecision, GuardRejection, OutputGuard};
use crate::core::transform::TransformEngine;
use crate::domain::columns::AnonymizedColumnSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a file was not processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Rejected by the output guard
    Guard(GuardRejection),
    /// The file is the dictionary's own backing file
    DictionaryFile,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Guard(rejection) => write!(f, "{rejection}"),
            SkipReason::DictionaryFile => write!(f, "file is the pseudonym dictionary"),
        }
    }
}

/// Details of a successfully anonymized file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Source file
    pub source: PathBuf,
    /// Written output file
    pub output: PathBuf,
    /// Columns that were anonymized
    pub columns: AnonymizedColumnSet,
    /// Column count established by the header row
    pub column_count: usize,
    /// Index of the last row, -1 for an empty file
    pub lines: i64,
    /// Cells replaced by a pseudonym
    pub substituted_cells: usize,
    /// Rows longer than the header row
    pub overlong_rows: usize,
    /// Dictionary entries minted while processing this file
    pub new_pseudonyms: usize,
}

/// Result of processing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Output written
    Cleaned(FileReport),
    /// Not processed, and not an error
    Skipped {
        /// Source file
        source: PathBuf,
        /// Why it was skipped
        reason: SkipReason,
    },
    /// Reading, transforming or writing failed
    Failed {
        /// Source file
        source: PathBuf,
        /// Error description
        error: String,
    },
}

impl FileOutcome {
    /// Source file of this outcome
    pub fn source(&self) -> &Path {
        match self {
            FileOutcome::Cleaned(report) => &report.source,
            FileOutcome::Skipped { source, .. } | FileOutcome::Failed { source, .. } => source,
        }
    }

    /// Returns true if the output file was written
    pub fn is_cleaned(&self) -> bool {
        matches!(self, FileOutcome::Cleaned(_))
    }
}

/// Per-file transform settings shared by every file of a batch
#[derive(Debug, Clone)]
pub struct FileCleaner {
    format: DelimitedFormat,
    guard: OutputGuard,
    default_column_count: usize,
}

impl FileCleaner {
    /// Creates a cleaner
    pub fn new(format: DelimitedFormat, guard: OutputGuard, default_column_count: usize) -> Self {
        Self {
            format,
            guard,
            default_column_count,
        }
    }

    /// Framing of data files
    pub fn format(&self) -> DelimitedFormat {
        self.format
    }

    /// Output guard
    pub fn guard(&self) -> &OutputGuard {
        &self.guard
    }

    /// Anonymizes `source` into its sibling output file
    ///
    /// The dictionary is borrowed for the duration of the transform and may
    /// gain entries. It is never saved here.
    pub fn clean(
        &self,
        source: &Path,
        columns: &AnonymizedColumnSet,
        dictionary: &mut PseudonymDictionary,
    ) -> FileOutcome {
        let output = match self.guard.check(source) {
            GuardDecision::Proceed(output) => output,
            GuardDecision::Reject(rejection) => {
                let reason = SkipReason::Guard(rejection);
                crate::log_file_skipped!(source, reason);
                return FileOutcome::Skipped {
                    source: source.to_path_buf(),
                    reason,
                };
            }
        };

        let failed = |error: String| {
            tracing::error!(source = %source.display(), error = %error, "Failed to anonymize file");
            FileOutcome::Failed {
                source: source.to_path_buf(),
                error,
            }
        };

        let input_rows = match self.format.read_rows(source) {
            Ok(rows) => rows,
            Err(e) => return failed(e.to_string()),
        };

        let minted_before = dictionary.minted();
        let mut engine =
            TransformEngine::new(dictionary, columns.clone(), self.default_column_count);
        if let Err(e) = engine.transform(input_rows) {
            return failed(e.to_string());
        }

        let column_count = engine.columns();
        let lines = engine.lines();
        let stats = engine.stats();
        let rows = engine.into_rows();
        let new_pseudonyms = dictionary.minted() - minted_before;

        if let Err(e) = self.format.write_rows(&output, &rows) {
            return failed(e.to_string());
        }

        crate::log_file_cleaned!(output, column_count, lines);

        FileOutcome::Cleaned(FileReport {
            source: source.to_path_buf(),
            output,
            columns: columns.clone(),
            column_count,
            lines,
            substituted_cells: stats.substituted_cells,
            overlong_rows: stats.overlong_rows,
            new_pseudonyms,
        })
    }
}
