//! `SnapshotObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use dr_core::Tick;
use dr_drive::CellEvent;
use dr_sim::{SimObserver, TickSummary, Unit};

use crate::row::{CellEventRow, TickSummaryRow, UnitSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes unit snapshots, tick summaries and cell
/// events to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SnapshotObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SnapshotObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the first write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

pub fn snapshot_row(tick: Tick, unit: &Unit) -> UnitSnapshotRow {
    UnitSnapshotRow {
        tick:    tick.0,
        unit_id: unit.id.0,
        house:   unit.house.0,
        x:       unit.coord.x,
        y:       unit.coord.y,
        facing:  unit.drive.facing.current().0,
        status:  unit.drive.status().as_str(),
        track:   unit.drive.track.map(|t| t.0),
        alive:   unit.alive,
    }
}

impl<W: OutputWriter> SimObserver for SnapshotObserver<W> {
    fn on_cell_event(&mut self, tick: Tick, event: &CellEvent) {
        let row = CellEventRow {
            tick:    tick.0,
            unit_id: event.unit.0,
            kind:    event.kind.as_str(),
            cell_x:  event.cell.x,
            cell_y:  event.cell.y,
        };
        let result = self.writer.write_cell_event(&row);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        let row = TickSummaryRow {
            tick:      summary.tick.0,
            moving:    summary.moving as u64,
            blocked:   summary.blocked as u64,
            events:    summary.events as u64,
            destroyed: summary.destroyed as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, units: &[Unit]) {
        let rows: Vec<UnitSnapshotRow> = units.iter().map(|u| snapshot_row(tick, u)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
