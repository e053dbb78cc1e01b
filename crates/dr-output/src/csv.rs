//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `unit_snapshots.csv`
//! - `tick_summaries.csv`
//! - `cell_events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CellEventRow, OutputResult, TickSummaryRow, UnitSnapshotRow};

pub const SNAPSHOT_HEADER: [&str; 9] = ["tick", "unit", "house", "x", "y", "facing", "status", "track", "alive"];
pub const SUMMARY_HEADER:  [&str; 5] = ["tick", "moving", "blocked", "events", "destroyed"];
pub const EVENT_HEADER:    [&str; 5] = ["tick", "unit", "kind", "cell_x", "cell_y"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    events:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("unit_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        let mut events = Writer::from_path(dir.join("cell_events.csv"))?;
        events.write_record(EVENT_HEADER)?;

        Ok(Self { snapshots, summaries, events, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[UnitSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.unit_id.to_string(),
                row.house.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.facing.to_string(),
                row.status.to_owned(),
                row.track.map(|t| t.to_string()).unwrap_or_default(),
                (row.alive as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.moving.to_string(),
            row.blocked.to_string(),
            row.events.to_string(),
            row.destroyed.to_string(),
        ])?;
        Ok(())
    }

    fn write_cell_event(&mut self, row: &CellEventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.unit_id.to_string(),
            row.kind.to_owned(),
            row.cell_x.to_string(),
            row.cell_y.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
