//! Clean coordinator - batch driver of the anonymization run
//!
//! The coordinator owns the pseudonym dictionary for the whole run. Each file
//! borrows it mutably while being transformed, and it is written back exactly
//! once, after the last file.

use super::file::{FileCleaner, FileOutcome, SkipReason};
use super::summary::CleanSummary;
use crate::adapters::delimited::DelimitedFormat;
use crate::anonymization::PseudonymDictionary;
use crate::config::CleanerConfig;
use crate::core::guard::OutputGuard;
use crate::core::profile::{ColumnPolicy, ColumnProfile};
use crate::domain::columns::AnonymizedColumnSet;
use crate::domain::errors::CleanerError;
use crate::domain::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Clean coordinator
pub struct CleanCoordinator {
    dictionary: PseudonymDictionary,
    cleaner: FileCleaner,
    profiles: Vec<ColumnProfile>,
    dictionary_loaded: usize,
}

impl CleanCoordinator {
    /// Create a coordinator and load the dictionary named by the configuration
    pub fn new(config: &CleanerConfig) -> Result<Self> {
        let format = config.input.format()?;
        let dictionary = PseudonymDictionary::open(&config.dictionary.path, format.encoding());
        Self::with_dictionary(config, dictionary)
    }

    /// Create a coordinator around an already loaded dictionary
    pub fn with_dictionary(config: &CleanerConfig, dictionary: PseudonymDictionary) -> Result<Self> {
        let format = config.input.format()?;
        let cleaner = FileCleaner::new(
            format,
            OutputGuard::new(config.output.prefix.clone()),
            config.input.default_column_count,
        );

        Ok(Self {
            dictionary_loaded: dictionary.size(),
            dictionary,
            cleaner,
            profiles: config.profiles.clone(),
        })
    }

    /// The dictionary shared by every file of the run
    pub fn dictionary(&self) -> &PseudonymDictionary {
        &self.dictionary
    }

    /// Framing of data files
    pub fn format(&self) -> DelimitedFormat {
        self.cleaner.format()
    }

    /// Anonymize one explicitly named file
    ///
    /// # Errors
    ///
    /// Returns [`CleanerError::SourceNotFound`] if the file does not exist or
    /// cannot be opened. The dictionary is not saved in that case.
    pub fn clean_single(
        &mut self,
        source: &Path,
        columns: &AnonymizedColumnSet,
    ) -> Result<CleanSummary> {
        let start_time = Instant::now();

        if !source.is_file() || fs::File::open(source).is_err() {
            return Err(CleanerError::SourceNotFound(source.to_path_buf()));
        }

        tracing::info!(
            source = %source.display(),
            columns = %columns,
            "Starting single file clean"
        );

        let mut summary = CleanSummary::new(self.dictionary_loaded);
        let outcome = self.cleaner.clean(source, columns, &mut self.dictionary);
        summary.record(outcome);

        Ok(self.finish(summary, start_time))
    }

    /// Anonymize every file of `folder`
    ///
    /// Files are visited in file-name order. Each file's columns come from the
    /// first profile whose marker occurs in its name, else `default_columns`.
    /// Sub-directories and the dictionary's own file are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CleanerError::SourceNotFound`] if the folder cannot be listed.
    pub fn clean_folder(
        &mut self,
        folder: &Path,
        default_columns: &AnonymizedColumnSet,
    ) -> Result<CleanSummary> {
        let start_time = Instant::now();
        let files = self.list_files(folder)?;
        let policy = ColumnPolicy::new(self.profiles.clone(), default_columns.clone());

        tracing::info!(
            folder = %folder.display(),
            files = files.len(),
            "Starting folder clean"
        );

        let dictionary_file = fs::canonicalize(self.dictionary.path()).ok();
        let mut summary = CleanSummary::new(self.dictionary_loaded);

        for path in files {
            if dictionary_file.is_some() && fs::canonicalize(&path).ok() == dictionary_file {
                let reason = SkipReason::DictionaryFile;
                crate::log_file_skipped!(path, reason);
                summary.record(FileOutcome::Skipped {
                    source: path,
                    reason,
                });
                continue;
            }

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let columns = policy.select(&file_name);

            tracing::debug!(file = %file_name, columns = %columns, "Selected columns");

            let outcome = self.cleaner.clean(&path, columns, &mut self.dictionary);
            summary.record(outcome);
        }

        Ok(self.finish(summary, start_time))
    }

    /// Regular files of `folder`, sorted by file name
    fn list_files(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        let entries =
            fs::read_dir(folder).map_err(|_| CleanerError::SourceNotFound(folder.to_path_buf()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                tracing::debug!(path = %path.display(), "Skipping directory");
                continue;
            }
            files.push(path);
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Save the dictionary and close the summary
    fn finish(&mut self, mut summary: CleanSummary, start_time: Instant) -> CleanSummary {
        summary.dictionary_entries = self.dictionary.size();
        summary.new_pseudonyms = summary.dictionary_entries - self.dictionary_loaded;

        match self.dictionary.save() {
            Ok(()) => summary.dictionary_saved = true,
            Err(e) => {
                tracing::error!(
                    path = %self.dictionary.path().display(),
                    error = %e,
                    "Failed to save dictionary"
                );
                summary.dictionary_error = Some(e.to_string());
            }
        }

        // Later runs on the same coordinator count from here
        self.dictionary_loaded = summary.dictionary_entries;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> CleanerConfig {
        let mut config = CleanerConfig::default();
        config.dictionary.path = dir.join(".dict.csv");
        config.input.default_column_count = 1;
        config
    }

    #[test]
    fn test_missing_single_source_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        let mut coordinator = CleanCoordinator::new(&config).unwrap();

        let result = coordinator.clean_single(
            &dir.path().join("absent.csv"),
            &AnonymizedColumnSet::from_indices([0]),
        );
        assert!(matches!(result, Err(CleanerError::SourceNotFound(_))));
        assert!(!dir.path().join(".dict.csv").exists());
    }

    #[test]
    fn test_single_clean_saves_dictionary() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("calls.csv");
        fs::write(&source, "a;b;c\r\n1;5551234;3\r\n").unwrap();

        let config = config_in(dir.path());
        let mut coordinator = CleanCoordinator::new(&config).unwrap();
        let summary = coordinator
            .clean_single(&source, &AnonymizedColumnSet::from_indices([1]))
            .unwrap();

        assert_eq!(summary.cleaned(), 1);
        assert_eq!(summary.new_pseudonyms, 1);
        assert!(summary.dictionary_saved);
        assert_eq!(
            fs::read_to_string(dir.path().join(".dict.csv")).unwrap(),
            "5551234;xxxaaa\r\n"
        );
    }

    #[test]
    fn test_missing_folder_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        let mut coordinator = CleanCoordinator::new(&config).unwrap();

        let result =
            coordinator.clean_folder(&dir.path().join("nowhere"), &AnonymizedColumnSet::new());
        assert!(matches!(result, Err(CleanerError::SourceNotFound(_))));
    }

    #[test]
    fn test_folder_skips_dictionary_file_and_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".dict.csv"), "111;xxxaaa\r\n").unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();
        fs::write(dir.path().join("data.csv"), "h\r\n222\r\n").unwrap();

        let config = config_in(dir.path());
        let mut coordinator = CleanCoordinator::new(&config).unwrap();
        let summary = coordinator
            .clean_folder(dir.path(), &AnonymizedColumnSet::from_indices([0]))
            .unwrap();

        assert_eq!(summary.files_seen(), 2);
        assert_eq!(summary.cleaned(), 1);
        assert!(matches!(
            &summary.outcomes[0],
            FileOutcome::Skipped {
                reason: SkipReason::DictionaryFile,
                ..
            }
        ));
        assert!(!dir.path().join("clean-.dict.csv").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("clean-data.csv")).unwrap(),
            "h\r\nxxxaab\r\n"
        );
    }

    #[test]
    fn test_unsaved_dictionary_keeps_output() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("calls.csv");
        fs::write(&source, "h\r\n5551234\r\n").unwrap();

        let mut config = config_in(dir.path());
        // Parent of the dictionary is a regular file, so saving fails
        fs::write(dir.path().join("blocker"), "").unwrap();
        config.dictionary.path = dir.path().join("blocker").join(".dict.csv");

        let mut coordinator = CleanCoordinator::new(&config).unwrap();
        let summary = coordinator
            .clean_single(&source, &AnonymizedColumnSet::from_indices([0]))
            .unwrap();

        assert!(!summary.dictionary_saved);
        assert!(summary.dictionary_error.is_some());
        assert!(summary.is_successful());
        assert!(dir.path().join("clean-calls.csv").exists());
    }
}
