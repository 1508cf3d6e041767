//! Clean command implementation
//!
//! Anonymizes one file (`--src`) or every file of a folder (`--folder`).

use crate::config::CleanerConfig;
use crate::core::clean::{CleanCoordinator, CleanSummary, FileOutcome};
use crate::domain::columns::AnonymizedColumnSet;
use crate::domain::errors::CleanerError;
use clap::Args;
use std::path::PathBuf;

/// Arguments of a clean run
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// File to anonymize
    #[arg(
        short = 's',
        long,
        value_name = "FILE",
        conflicts_with = "folder",
        required_unless_present = "folder"
    )]
    pub src: Option<PathBuf>,

    /// Folder whose files are anonymized, columns chosen by file name
    #[arg(short = 'f', long, value_name = "DIR")]
    pub folder: Option<PathBuf>,

    /// Columns to anonymize (with --folder: used when no profile matches)
    #[arg(short = 'c', long = "col", value_name = "N", num_args = 0..)]
    pub col: Vec<usize>,

    /// Field delimiter of the data files
    #[arg(short = 'd', long = "delim", value_name = "CHAR")]
    pub delim: Option<String>,

    /// Dictionary file (overrides configuration)
    #[arg(long, value_name = "FILE")]
    pub dict: Option<PathBuf>,
}

impl CleanArgs {
    /// Columns given on the command line, duplicates removed
    pub fn columns(&self) -> AnonymizedColumnSet {
        AnonymizedColumnSet::from_indices(self.col.iter().copied())
    }

    /// Apply CLI overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut CleanerConfig) {
        if let Some(delim) = &self.delim {
            tracing::info!(delimiter = %delim, "Overriding delimiter from CLI");
            config.input.delimiter = delim.clone();
        }
        if let Some(dict) = &self.dict {
            tracing::info!(path = %dict.display(), "Overriding dictionary path from CLI");
            config.dictionary.path = dict.clone();
        }
    }

    /// Execute the clean command
    pub fn execute(&self, mut config: CleanerConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting clean command");

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let columns = self.columns();
        let mut coordinator = match CleanCoordinator::new(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create clean coordinator");
                eprintln!("Failed to initialize: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("{} values in dictionary", coordinator.dictionary().size());

        let result = match (&self.src, &self.folder) {
            (Some(src), _) => {
                println!("Source: {}", src.display());
                println!("Columns to anonymize: {columns}");
                println!("Delimiter: \"{}\"", coordinator.format().delimiter() as char);
                coordinator.clean_single(src, &columns)
            }
            (None, Some(folder)) => {
                println!("Folder: {}", folder.display());
                println!("Delimiter: \"{}\"", coordinator.format().delimiter() as char);
                coordinator.clean_folder(folder, &columns)
            }
            (None, None) => {
                eprintln!("One of --src or --folder is required");
                return Ok(2);
            }
        };

        let summary = match result {
            Ok(summary) => summary,
            Err(CleanerError::SourceNotFound(path)) => {
                tracing::error!(path = %path.display(), "Source not found");
                println!("❌ File {} does not exist", path.display());
                return Ok(3);
            }
            Err(e) => return Err(e.into()),
        };

        print_outcomes(&summary, self.folder.is_some());
        print_summary(&summary);

        Ok(summary.exit_code())
    }
}

fn print_outcomes(summary: &CleanSummary, folder_mode: bool) {
    for outcome in &summary.outcomes {
        println!();
        if folder_mode {
            println!("File: {}", outcome.source().display());
        }
        match outcome {
            FileOutcome::Cleaned(report) => {
                if folder_mode {
                    println!("Columns to anonymize: {}", report.columns);
                }
                println!("Output: {}", report.output.display());
                println!("{} cols x {} lines", report.column_count, report.lines);
            }
            FileOutcome::Skipped { reason, .. } => {
                println!("⏭️  Skipped: {reason}");
            }
            FileOutcome::Failed { error, .. } => {
                println!("❌ Failed: {error}");
            }
        }
    }
}

fn print_summary(summary: &CleanSummary) {
    println!();
    println!("Clean Summary:");
    println!("  Files: {}", summary.files_seen());
    println!("  Cleaned: {}", summary.cleaned());
    println!("  Skipped: {}", summary.skipped());
    println!("  Failed: {}", summary.failed());
    println!("  New pseudonyms: {}", summary.new_pseudonyms);
    println!("  {} values in dictionary", summary.dictionary_entries);
    if let Some(error) = &summary.dictionary_error {
        println!("  ⚠️  Dictionary not saved: {error}");
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
}
