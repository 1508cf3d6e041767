//! Row/column cursor with a two-phase column width
//!
//! The first row establishes the column count: it starts at a configured
//! default and grows while cells are added to row 0. The count freezes as soon
//! as the second row starts and never changes afterwards.

/// Phase of the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No row added yet
    BeforeFirstRow,
    /// Filling row 0, column count may still grow
    InFirstRow,
    /// Filling a later row, column count frozen
    InSubsequentRow,
}

/// Current position and established width of a table being rebuilt
///
/// # Examples
///
/// ```
/// use telclean::core::transform::cursor::{CursorState, RowColumnCursor};
///
/// let mut cursor = RowColumnCursor::new(2);
/// assert_eq!(cursor.lines(), -1);
///
/// assert_eq!(cursor.add_row(), 2);
/// cursor.add_column();
/// assert!(cursor.add_column()); // third cell in row 0 widens the table
/// assert_eq!(cursor.column_count(), 3);
///
/// assert_eq!(cursor.add_row(), 3);
/// assert_eq!(cursor.state(), CursorState::InSubsequentRow);
/// assert!(!cursor.add_column());
/// ```
#[derive(Debug, Clone)]
pub struct RowColumnCursor {
    state: CursorState,
    row: usize,
    column: usize,
    column_count: usize,
}

impl RowColumnCursor {
    /// Creates a cursor before the first row
    ///
    /// The default column count is raised to 1 if zero is given.
    pub fn new(default_column_count: usize) -> Self {
        Self {
            state: CursorState::BeforeFirstRow,
            row: 0,
            column: 0,
            column_count: default_column_count.max(1),
        }
    }

    /// Current phase
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Index of the current row, if any row was added
    pub fn row(&self) -> Option<usize> {
        match self.state {
            CursorState::BeforeFirstRow => None,
            _ => Some(self.row),
        }
    }

    /// Index of the current column
    pub fn column(&self) -> usize {
        self.column
    }

    /// Column count: provisional during row 0, frozen afterwards
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Zero-based index of the last row added, or -1 when no row was added
    pub fn lines(&self) -> i64 {
        self.row().map_or(-1, |row| row as i64)
    }

    /// Returns true while positioned in row 0
    pub fn in_header(&self) -> bool {
        self.state == CursorState::InFirstRow
    }

    /// Returns true once the column count can no longer change
    pub fn is_width_frozen(&self) -> bool {
        self.state == CursorState::InSubsequentRow
    }

    /// Starts a new row and returns the number of cells to allocate for it
    pub fn add_row(&mut self) -> usize {
        match self.state {
            CursorState::BeforeFirstRow => {
                self.state = CursorState::InFirstRow;
                self.row = 0;
            }
            CursorState::InFirstRow => {
                self.state = CursorState::InSubsequentRow;
                self.row += 1;
                tracing::trace!(column_count = self.column_count, "Column count frozen");
            }
            CursorState::InSubsequentRow => {
                self.row += 1;
            }
        }
        self.column = 0;
        self.column_count
    }

    /// Moves to the next column, returning true if the column count grew
    ///
    /// Growth only happens in row 0, when the new column index reaches the
    /// current count.
    pub fn add_column(&mut self) -> bool {
        self.column += 1;
        if self.state == CursorState::InFirstRow && self.column >= self.column_count {
            self.column_count += 1;
            return true;
        }
        false
    }
}

impl Default for RowColumnCursor {
    fn default() -> Self {
        Self::new(crate::config::schema::DEFAULT_COLUMN_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let cursor = RowColumnCursor::new(4);
        assert_eq!(cursor.state(), CursorState::BeforeFirstRow);
        assert_eq!(cursor.row(), None);
        assert_eq!(cursor.column(), 0);
        assert_eq!(cursor.column_count(), 4);
        assert_eq!(cursor.lines(), -1);
        assert!(!cursor.in_header());
        assert!(!cursor.is_width_frozen());
    }

    #[test]
    fn test_first_row_grows_to_six() {
        let mut cursor = RowColumnCursor::new(4);
        assert_eq!(cursor.add_row(), 4);
        assert_eq!(cursor.lines(), 0);

        let grew: Vec<bool> = (1..6).map(|_| cursor.add_column()).collect();
        assert_eq!(grew, vec![false, false, false, true, true]);
        assert_eq!(cursor.column(), 5);
        assert_eq!(cursor.column_count(), 6);
        assert!(!cursor.is_width_frozen());

        assert_eq!(cursor.add_row(), 6);
        assert!(cursor.is_width_frozen());
        assert_eq!(cursor.column(), 0);
    }

    #[test]
    fn test_width_frozen_after_first_row() {
        let mut cursor = RowColumnCursor::new(2);
        cursor.add_row();
        cursor.add_row();
        for _ in 0..10 {
            assert!(!cursor.add_column());
        }
        assert_eq!(cursor.column_count(), 2);
        assert_eq!(cursor.column(), 10);
        assert_eq!(cursor.add_row(), 2);
        assert_eq!(cursor.lines(), 2);
    }

    #[test]
    fn test_short_first_row_keeps_default() {
        let mut cursor = RowColumnCursor::new(4);
        cursor.add_row();
        cursor.add_column();
        assert_eq!(cursor.add_row(), 4);
    }

    #[test]
    fn test_zero_default_is_raised() {
        let cursor = RowColumnCursor::new(0);
        assert_eq!(cursor.column_count(), 1);
    }

    #[test]
    fn test_add_column_before_first_row_does_not_grow() {
        let mut cursor = RowColumnCursor::new(1);
        assert!(!cursor.add_column());
        assert_eq!(cursor.column_count(), 1);
        // The column index is reset by the first row
        cursor.add_row();
        assert_eq!(cursor.column(), 0);
    }
}
