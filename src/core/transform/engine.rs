//! Row/column transform engine
//!
//! Rebuilds a table cell by cell through a [`RowColumnCursor`], substituting
//! the cells of the selected columns with the [`Anonymizer`]. Row 0 is a header
//! row and is copied verbatim.

use super::cursor::{CursorState, RowColumnCursor};
use crate::anonymization::Anonymizer;
use crate::domain::columns::AnonymizedColumnSet;
use crate::domain::errors::CleanerError;
use crate::domain::result::Result;

/// Counters gathered while transforming one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Cells whose value was replaced
    pub substituted_cells: usize,
    /// Non-header rows that carried more cells than the frozen column count
    pub overlong_rows: usize,
}

/// Stateful cell walker producing the output table
///
/// # Examples
///
/// ```
/// use telclean::anonymization::PseudonymDictionary;
/// use telclean::core::transform::TransformEngine;
/// use telclean::domain::AnonymizedColumnSet;
///
/// let mut dictionary = PseudonymDictionary::in_memory();
/// let rows = vec![vec!["a", "b", "c"], vec!["1", "5551234", "3"]];
///
/// let mut engine = TransformEngine::new(&mut dictionary, AnonymizedColumnSet::from_indices([1]), 3);
/// engine.transform(rows)?;
///
/// assert_eq!(engine.rows()[1], vec!["1", "xxxaaa", "3"]);
/// # Ok::<(), telclean::domain::CleanerError>(())
/// ```
pub struct TransformEngine<'a, A: Anonymizer + ?Sized> {
    cursor: RowColumnCursor,
    columns: AnonymizedColumnSet,
    anonymizer: &'a mut A,
    rows: Vec<Vec<String>>,
    stats: TransformStats,
    overlong_row: Option<usize>,
}

impl<'a, A: Anonymizer + ?Sized> TransformEngine<'a, A> {
    /// Creates an engine for one table
    pub fn new(
        anonymizer: &'a mut A,
        columns: AnonymizedColumnSet,
        default_column_count: usize,
    ) -> Self {
        Self {
            cursor: RowColumnCursor::new(default_column_count),
            columns,
            anonymizer,
            rows: Vec::new(),
            stats: TransformStats::default(),
            overlong_row: None,
        }
    }

    /// Starts a new row sized to the current column count
    pub fn add_row(&mut self) {
        let width = self.cursor.add_row();
        self.rows.push(vec![String::new(); width]);
    }

    /// Moves to the next column, widening row 0 when needed
    pub fn add_column(&mut self) {
        if self.cursor.add_column() {
            if let Some(header) = self.rows.first_mut() {
                header.push(String::new());
            }
        }
    }

    /// Writes a cell at the current position, applying the substitution policy
    pub fn set(&mut self, value: &str) -> Result<()> {
        let row_index = match self.cursor.row() {
            Some(row) => row,
            None => {
                return Err(CleanerError::Transform(
                    "cell written before the first row was added".to_string(),
                ))
            }
        };
        let column = self.cursor.column();

        let cell = if self.should_substitute(row_index, column) {
            let replacement = self.anonymizer.anonymize(value);
            if replacement != value {
                self.stats.substituted_cells += 1;
            }
            replacement
        } else {
            value.to_string()
        };

        let row = self
            .rows
            .last_mut()
            .ok_or_else(|| CleanerError::Transform("row buffer missing".to_string()))?;

        // Only later rows can outgrow their buffer; the width itself stays frozen
        if column >= row.len() {
            row.resize(column + 1, String::new());
            if self.overlong_row != Some(row_index) {
                self.overlong_row = Some(row_index);
                self.stats.overlong_rows += 1;
                tracing::warn!(
                    row = row_index,
                    column_count = self.cursor.column_count(),
                    "Row has more cells than the header row, keeping extra cells"
                );
            }
        }
        row[column] = cell;
        Ok(())
    }

    /// Appends a whole row of cells
    ///
    /// The cursor advances between cells, so a row of `n` cells addresses
    /// columns `0..n`.
    pub fn push_row<I, S>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_row();
        for (position, cell) in cells.into_iter().enumerate() {
            if position > 0 {
                self.add_column();
            }
            self.set(cell.as_ref())?;
        }
        Ok(())
    }

    /// Feeds every row of a table
    pub fn transform<R, I, S>(&mut self, rows: R) -> Result<()>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for row in rows {
            self.push_row(row)?;
        }
        tracing::debug!(
            rows = self.rows.len(),
            columns = self.cursor.column_count(),
            substituted = self.stats.substituted_cells,
            "Table transformed"
        );
        Ok(())
    }

    /// Output rows built so far
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Consumes the engine, returning the output rows
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Column count established by row 0
    pub fn columns(&self) -> usize {
        self.cursor.column_count()
    }

    /// Zero-based index of the last row added, -1 when empty
    pub fn lines(&self) -> i64 {
        self.cursor.lines()
    }

    /// Current cursor phase
    pub fn state(&self) -> CursorState {
        self.cursor.state()
    }

    /// Counters for this table
    pub fn stats(&self) -> TransformStats {
        self.stats
    }

    fn should_substitute(&self, row: usize, column: usize) -> bool {
        row > 0 && self.columns.contains(column)
    }
}
