//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `unit_snapshots`, `tick_summaries` and `cell_events`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{CellEventRow, OutputResult, TickSummaryRow, UnitSnapshotRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS unit_snapshots (
                 tick    INTEGER NOT NULL,
                 unit    INTEGER NOT NULL,
                 house   INTEGER NOT NULL,
                 x       INTEGER NOT NULL,
                 y       INTEGER NOT NULL,
                 facing  INTEGER NOT NULL,
                 status  TEXT    NOT NULL,
                 track   INTEGER,
                 alive   INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick      INTEGER PRIMARY KEY,
                 moving    INTEGER NOT NULL,
                 blocked   INTEGER NOT NULL,
                 events    INTEGER NOT NULL,
                 destroyed INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS cell_events (
                 tick    INTEGER NOT NULL,
                 unit    INTEGER NOT NULL,
                 kind    TEXT    NOT NULL,
                 cell_x  INTEGER NOT NULL,
                 cell_y  INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[UnitSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO unit_snapshots \
                 (tick, unit, house, x, y, facing, status, track, alive) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.unit_id,
                    row.house,
                    row.x,
                    row.y,
                    row.facing,
                    row.status,
                    row.track,
                    row.alive as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, moving, blocked, events, destroyed) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![row.tick, row.moving, row.blocked, row.events, row.destroyed],
        )?;
        Ok(())
    }

    fn write_cell_event(&mut self, row: &CellEventRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO cell_events (tick, unit, kind, cell_x, cell_y) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![row.tick, row.unit_id, row.kind, row.cell_x, row.cell_y],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
