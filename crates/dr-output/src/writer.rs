//! The `OutputWriter` trait implemented by all backend writers.

use crate::{CellEventRow, OutputResult, TickSummaryRow, UnitSnapshotRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// Errors are stored by [`SnapshotObserver`][crate::SnapshotObserver] and
/// retrieved with `take_error` after the run.
pub trait OutputWriter {
    /// Write one snapshot's worth of unit rows.
    fn write_snapshots(&mut self, rows: &[UnitSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    fn write_cell_event(&mut self, row: &CellEventRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: later calls do nothing.
    fn finish(&mut self) -> OutputResult<()>;
}
