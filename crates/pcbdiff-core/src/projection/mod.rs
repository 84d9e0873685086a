//! Diff Projection: highlight classes and the differences table
//!
//! Both are views over a [`ComparisonResult`](crate::compare::ComparisonResult)
//! and the two stores. "Old" always means the golden layout and "new" the
//! unit under test, whichever layout is on screen.

pub mod highlight;
pub mod table;

pub use highlight::{highlight_classes, HighlightClass, RecordHighlight};
pub use table::{build_diff_table, DiffColumn, DiffRow, DiffTable, SortOrder, UnmatchedRow};
