//! Delimited text files in a single-byte legacy encoding
//!
//! Data files and the dictionary are stored as delimiter-separated records in a
//! fixed encoding (Windows-1252 by default). Reading never treats the first
//! record as a header and accepts ragged records. A blank line is a record with
//! no fields. Writing uses minimal quoting and CRLF record terminators.

use crate::domain::errors::CleanerError;
use crate::domain::result::Result;
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;

/// Default encoding label for data and dictionary files
pub const DEFAULT_ENCODING: &str = "windows-1252";

/// Default field delimiter
pub const DEFAULT_DELIMITER: u8 = b';';

/// Parses a delimiter given as text; it must be exactly one ASCII character
pub fn parse_delimiter(value: &str) -> Result<u8> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && c != '"' && c != '\n' && c != '\r' => Ok(c as u8),
        _ => Err(CleanerError::Configuration(format!(
            "Invalid delimiter {value:?}: must be a single ASCII character other than a quote or line break"
        ))),
    }
}

/// Resolves an encoding label such as `windows-1252` or `utf-8`
///
/// Encodings that cannot be written back (UTF-16, replacement) are rejected so
/// that input and output always share the same encoding.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        CleanerError::Configuration(format!("Unknown encoding label '{label}'"))
    })?;
    if encoding.output_encoding() != encoding {
        return Err(CleanerError::Configuration(format!(
            "Encoding '{}' cannot be used for output",
            encoding.name()
        )));
    }
    Ok(encoding)
}

/// Framing and encoding of a delimited text file
#[derive(Debug, Clone, Copy)]
pub struct DelimitedFormat {
    delimiter: u8,
    encoding: &'static Encoding,
}

impl DelimitedFormat {
    /// Creates a format from a delimiter byte and an encoding
    pub fn new(delimiter: u8, encoding: &'static Encoding) -> Self {
        Self {
            delimiter,
            encoding,
        }
    }

    /// Creates a format from textual settings
    pub fn from_labels(delimiter: &str, encoding: &str) -> Result<Self> {
        Ok(Self::new(parse_delimiter(delimiter)?, resolve_encoding(encoding)?))
    }

    /// Returns a copy using another delimiter
    pub fn with_delimiter(self, delimiter: u8) -> Self {
        Self { delimiter, ..self }
    }

    /// Field delimiter byte
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Text encoding
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Reads every record of a file
    pub fn read_rows(&self, path: &Path) -> Result<Vec<Vec<String>>> {
        let bytes = fs::read(path).map_err(|e| {
            CleanerError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.decode_rows(&bytes)
    }

    /// Decodes records from raw file content
    ///
    /// Blank lines come back as empty records, in place.
    pub fn decode_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>> {
        let (text, had_errors) = self.encoding.decode_without_bom_handling(bytes);
        if had_errors {
            return Err(CleanerError::Encoding(format!(
                "Input is not valid {}",
                self.encoding.name()
            )));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(text.as_bytes());

        // The csv reader skips blank lines, so they are put back by position
        let mut records = reader.records();
        let mut rows = Vec::new();
        for blank in blank_records(&text, self.delimiter) {
            if blank {
                rows.push(Vec::new());
                continue;
            }
            match records.next() {
                Some(record) => rows.push(record?.iter().map(str::to_string).collect()),
                None => break,
            }
        }
        for record in records {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    /// Writes every record to a file, replacing any previous content
    pub fn write_rows(&self, path: &Path, rows: &[Vec<String>]) -> Result<()> {
        let bytes = self.encode_rows(rows)?;
        fs::write(path, bytes).map_err(|e| {
            CleanerError::Io(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    /// Encodes records to raw file content
    pub fn encode_rows(&self, rows: &[Vec<String>]) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .flexible(true)
            .from_writer(Vec::new());

        for row in rows {
            writer.write_record(row)?;
        }

        let utf8 = writer
            .into_inner()
            .map_err(|e| CleanerError::Csv(e.to_string()))?;
        let text = String::from_utf8(utf8).map_err(|e| CleanerError::Encoding(e.to_string()))?;

        let (encoded, _, had_errors) = self.encoding.encode(&text);
        if had_errors {
            return Err(CleanerError::Encoding(format!(
                "Output contains characters not representable in {}",
                self.encoding.name()
            )));
        }
        Ok(encoded.into_owned())
    }
}

#[derive(Clone, Copy, PartialEq)]
enum ScanState {
    StartField,
    InField,
    InQuoted,
    QuoteInQuoted,
}

/// For each physical record of `text`, whether it is a blank line
///
/// Line breaks inside quoted fields belong to their record. `\r\n`, `\r` and
/// `\n` all end a record. Nothing after the last terminator is not a record.
fn blank_records(text: &str, delimiter: u8) -> Vec<bool> {
    let bytes = text.as_bytes();
    let mut blanks = Vec::new();
    let mut state = ScanState::StartField;
    let mut record_len = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        let ends_record = (byte == b'\r' || byte == b'\n') && state != ScanState::InQuoted;

        if ends_record {
            blanks.push(record_len == 0);
            record_len = 0;
            state = ScanState::StartField;
            if byte == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                i += 1;
            }
            i += 1;
            continue;
        }

        state = match (state, byte) {
            (ScanState::StartField, b'"') => ScanState::InQuoted,
            (ScanState::StartField | ScanState::InField, b) if b == delimiter => {
                ScanState::StartField
            }
            (ScanState::StartField | ScanState::InField, _) => ScanState::InField,
            (ScanState::InQuoted, b'"') => ScanState::QuoteInQuoted,
            (ScanState::InQuoted, _) => ScanState::InQuoted,
            (ScanState::QuoteInQuoted, b'"') => ScanState::InQuoted,
            (ScanState::QuoteInQuoted, b) if b == delimiter => ScanState::StartField,
            (ScanState::QuoteInQuoted, _) => ScanState::InField,
        };
        record_len += 1;
        i += 1;
    }

    if record_len > 0 {
        blanks.push(false);
    }
    blanks
}

impl Default for DelimitedFormat {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER, encoding_rs::WINDOWS_1252)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("\t").unwrap(), b'\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
        assert!(parse_delimiter("\"").is_err());
    }

    #[test]
    fn test_resolve_encoding() {
        assert_eq!(resolve_encoding("windows-1252").unwrap(), encoding_rs::WINDOWS_1252);
        assert_eq!(resolve_encoding("cp1252").unwrap(), encoding_rs::WINDOWS_1252);
        assert_eq!(resolve_encoding("UTF-8").unwrap(), encoding_rs::UTF_8);
        assert!(resolve_encoding("utf-16le").is_err());
        assert!(resolve_encoding("klingon").is_err());
    }

    #[test]
    fn test_decode_ragged_rows_without_header() {
        let format = DelimitedFormat::default();
        let decoded = format.decode_rows(b"a;b\r\n1;2;3;4\r\n").unwrap();
        assert_eq!(decoded, rows(&[&["a", "b"], &["1", "2", "3", "4"]]));
    }

    #[test]
    fn test_decode_keeps_blank_lines() {
        let format = DelimitedFormat::default();
        let decoded = format.decode_rows(b"h0;h1\r\n\r\n1;2\r\n").unwrap();
        assert_eq!(decoded, rows(&[&["h0", "h1"], &[], &["1", "2"]]));

        let decoded = format.decode_rows(b"\n\na\n\rb").unwrap();
        assert_eq!(decoded, rows(&[&[], &[], &["a"], &[], &["b"]]));
    }

    #[test]
    fn test_decode_quoted_line_breaks_are_not_blank() {
        let format = DelimitedFormat::default();
        let decoded = format
            .decode_rows(b"\"multi\r\n\r\nline\";x\r\n\"\"\r\n\r\nend\r\n")
            .unwrap();
        assert_eq!(
            decoded,
            rows(&[&["multi\r\n\r\nline", "x"], &[""], &[], &["end"]])
        );
    }

    #[test]
    fn test_blank_records_mask() {
        assert_eq!(blank_records("", b';'), Vec::<bool>::new());
        assert_eq!(blank_records("a\r\n", b';'), vec![false]);
        assert_eq!(blank_records("a\r\n\r\n", b';'), vec![false, true]);
        assert_eq!(blank_records(";\n\"a\"\"\nb\"\n", b';'), vec![false, false]);
    }

    #[test]
    fn test_decode_windows_1252() {
        let format = DelimitedFormat::default();
        // 0xE9 is 'é' in Windows-1252
        let decoded = format.decode_rows(b"appel\xe9;x\n").unwrap();
        assert_eq!(decoded[0][0], "appelé");
    }

    #[test]
    fn test_encode_minimal_quoting() {
        let format = DelimitedFormat::default();
        let encoded = format
            .encode_rows(&rows(&[&["plain", "with;delim", "say \"hi\""]]))
            .unwrap();
        assert_eq!(encoded, b"plain;\"with;delim\";\"say \"\"hi\"\"\"\r\n".to_vec());
    }

    #[test]
    fn test_encode_rejects_unmappable() {
        let format = DelimitedFormat::default();
        let result = format.encode_rows(&rows(&[&["\u{1F4DE}"]]));
        assert!(matches!(result, Err(CleanerError::Encoding(_))));
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let format = DelimitedFormat::default().with_delimiter(b',');
        let data = rows(&[&["nom", "numéro"], &["Zoé", "0612345678", ""]]);

        format.write_rows(&path, &data).unwrap();
        assert_eq!(format.read_rows(&path).unwrap(), data);
    }

    #[test]
    fn test_read_missing_file() {
        let format = DelimitedFormat::default();
        let result = format.read_rows(Path::new("/nonexistent/telclean/input.csv"));
        assert!(matches!(result, Err(CleanerError::Io(_))));
    }
}
