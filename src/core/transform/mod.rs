//! Table transformation
//!
//! - [`cursor`] - row/column position and the width established by row 0
//! - [`engine`] - per-cell substitution policy driving the cursor

pub mod cursor;
pub mod engine;

pub use cursor::{CursorState, RowColumnCursor};
pub use engine::{TransformEngine, TransformStats};
