//! Persistent pseudonym dictionary
//!
//! Maps original values to the pseudonyms minted for them. The mapping is
//! append-only: an entry is never removed, and the ordinal used to mint a new
//! pseudonym is the number of entries at insertion time. Entries are kept in
//! insertion order so the backing file lists them in ordinal order.
//!
//! The backing file holds one `value;pseudonym` record per line. Its delimiter is
//! always `;`, independently of the data files being processed.

use super::pseudonym;
use super::Anonymizer;
use crate::adapters::delimited::DelimitedFormat;
use crate::domain::errors::CleanerError;
use crate::domain::result::Result;
use encoding_rs::Encoding;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default location of the dictionary file
pub const DEFAULT_DICTIONARY_PATH: &str = "./.dict.csv";

/// Field delimiter of the dictionary file
pub const DICTIONARY_DELIMITER: u8 = b';';

/// Original value to pseudonym mapping backed by a file
#[derive(Debug)]
pub struct PseudonymDictionary {
    path: PathBuf,
    format: DelimitedFormat,
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
    minted: usize,
}

impl PseudonymDictionary {
    /// Creates an empty dictionary bound to `path`, without reading it
    ///
    /// An empty path yields an in-memory dictionary: `load` and `save` do nothing.
    pub fn new(path: impl Into<PathBuf>, encoding: &'static Encoding) -> Self {
        Self {
            path: path.into(),
            format: DelimitedFormat::new(DICTIONARY_DELIMITER, encoding),
            entries: Vec::new(),
            index: HashMap::new(),
            minted: 0,
        }
    }

    /// Creates a dictionary that is never persisted
    pub fn in_memory() -> Self {
        Self::new(PathBuf::new(), encoding_rs::WINDOWS_1252)
    }

    /// Creates a dictionary bound to `path` and loads it
    pub fn open(path: impl Into<PathBuf>, encoding: &'static Encoding) -> Self {
        let mut dictionary = Self::new(path, encoding);
        dictionary.load();
        dictionary
    }

    /// Replaces the content with the backing file, returning the entry count
    ///
    /// A missing file, an unreadable file, or a malformed record all leave the
    /// dictionary empty. None of them is an error for the caller.
    pub fn load(&mut self) -> usize {
        self.clear();

        if self.is_in_memory() {
            return 0;
        }

        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No dictionary file, starting empty");
            return 0;
        }

        if let Err(e) = self.read_entries() {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to read dictionary, starting empty"
            );
            self.clear();
            return 0;
        }

        tracing::info!(
            path = %self.path.display(),
            entries = self.entries.len(),
            "Dictionary loaded"
        );
        self.entries.len()
    }

    /// Writes every entry to the backing file
    ///
    /// The caller decides what a failure means; the batch driver only logs it.
    pub fn save(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        self.format.write_rows(&self.path, &self.records())?;

        tracing::debug!(
            path = %self.path.display(),
            entries = self.entries.len(),
            "Dictionary saved"
        );
        Ok(())
    }

    /// Saves the dictionary then reads it back from disk
    pub fn reload(&mut self) -> Result<usize> {
        self.save()?;
        Ok(self.load())
    }

    /// Returns the pseudonym for `value`, minting one if needed
    ///
    /// Values that are not integers, or that are the integer zero, are returned
    /// unchanged and do not consume an ordinal.
    pub fn anonymize(&mut self, value: &str) -> String {
        if !is_nonzero_integer(value) {
            return value.to_string();
        }

        if let Some(existing) = self.get(value) {
            return existing.to_string();
        }

        let pseudonym = pseudonym::encode(self.size());
        self.insert(value.to_string(), pseudonym.clone());
        self.minted += 1;

        tracing::trace!(ordinal = self.size() - 1, "Minted pseudonym");
        pseudonym
    }

    /// Looks up an existing pseudonym without minting
    pub fn get(&self, value: &str) -> Option<&str> {
        self.index
            .get(value)
            .map(|&position| self.entries[position].1.as_str())
    }

    /// Number of entries, which is also the next ordinal
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Alias of [`size`](Self::size)
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Returns true if the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pseudonyms minted since the dictionary was created or last loaded
    pub fn minted(&self) -> usize {
        self.minted
    }

    /// Backing file path (empty for an in-memory dictionary)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.minted = 0;
    }

    // A repeated key keeps its first position and takes the last pseudonym
    fn insert(&mut self, value: String, pseudonym: String) {
        match self.index.get(&value) {
            Some(&position) => self.entries[position].1 = pseudonym,
            None => {
                self.index.insert(value.clone(), self.entries.len());
                self.entries.push((value, pseudonym));
            }
        }
    }

    fn read_entries(&mut self) -> Result<()> {
        let rows = self.format.read_rows(&self.path)?;
        for (line, row) in rows.into_iter().enumerate() {
            if row.is_empty() {
                continue;
            }
            let mut fields = row.into_iter();
            match (fields.next(), fields.next()) {
                (Some(value), Some(pseudonym)) => self.insert(value, pseudonym),
                _ => {
                    return Err(CleanerError::Csv(format!(
                        "dictionary record {} has fewer than two fields",
                        line + 1
                    )))
                }
            }
        }
        Ok(())
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .map(|(value, pseudonym)| vec![value.clone(), pseudonym.clone()])
            .collect()
    }
}

impl Anonymizer for PseudonymDictionary {
    fn anonymize(&mut self, value: &str) -> String {
        PseudonymDictionary::anonymize(self, value)
    }
}

/// Returns true if a cell holds a non-zero integer of any length
///
/// The check is textual: surrounding whitespace is ignored, then an optional
/// `+` or `-` sign, then ASCII digits. Single underscores between digits are
/// accepted (`555_1234`). Non-ASCII digits are not. A value whose digits are
/// all zeros is zero.
pub fn is_nonzero_integer(value: &str) -> bool {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix(['+', '-'])
        .unwrap_or(trimmed)
        .as_bytes();

    let (Some(first), Some(last)) = (digits.first(), digits.last()) else {
        return false;
    };
    if !first.is_ascii_digit() || !last.is_ascii_digit() {
        return false;
    }

    let mut nonzero = false;
    let mut previous = b'0';
    for &byte in digits {
        match byte {
            b'0'..=b'9' => nonzero |= byte != b'0',
            b'_' if previous != b'_' => {}
            _ => return false,
        }
        previous = byte;
    }
    nonzero
}
