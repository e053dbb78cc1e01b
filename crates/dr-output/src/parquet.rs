//! Parquet output backend (feature `parquet`).
//!
//! Creates three files in the configured output directory:
//! - `unit_snapshots.parquet`
//! - `tick_summaries.parquet`
//! - `cell_events.parquet`
//!
//! Tick summaries and cell events are buffered and written as one row group
//! each by `finish()`.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{BooleanBuilder, Int32Builder, StringBuilder, UInt32Builder, UInt64Builder, UInt8Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{CellEventRow, OutputResult, TickSummaryRow, UnitSnapshotRow};

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",   DataType::UInt64,  false),
        Field::new("unit",   DataType::UInt32,  false),
        Field::new("house",  DataType::UInt8,   false),
        Field::new("x",      DataType::Int32,   false),
        Field::new("y",      DataType::Int32,   false),
        Field::new("facing", DataType::UInt8,   false),
        Field::new("status", DataType::Utf8,    false),
        Field::new("track",  DataType::UInt8,   true),
        Field::new("alive",  DataType::Boolean, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",      DataType::UInt64, false),
        Field::new("moving",    DataType::UInt64, false),
        Field::new("blocked",   DataType::UInt64, false),
        Field::new("events",    DataType::UInt64, false),
        Field::new("destroyed", DataType::UInt64, false),
    ]))
}

fn event_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",   DataType::UInt64, false),
        Field::new("unit",   DataType::UInt32, false),
        Field::new("kind",   DataType::Utf8,   false),
        Field::new("cell_x", DataType::Int32,  false),
        Field::new("cell_y", DataType::Int32,  false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

fn open(dir: &Path, name: &str, schema: &Arc<Schema>) -> OutputResult<ArrowWriter<File>> {
    let file = File::create(dir.join(name))?;
    Ok(ArrowWriter::try_new(file, Arc::clone(schema), Some(snappy_props()))?)
}

/// Writes simulation output to three Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots:    Option<ArrowWriter<File>>,
    summaries:    Option<ArrowWriter<File>>,
    events:       Option<ArrowWriter<File>>,
    snap_schema:  Arc<Schema>,
    summ_schema:  Arc<Schema>,
    event_schema: Arc<Schema>,
    summ_buf:     Vec<TickSummaryRow>,
    event_buf:    Vec<CellEventRow>,
}

impl ParquetWriter {
    /// Create the Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();
        let event_schema = event_schema();
        Ok(Self {
            snapshots: Some(open(dir, "unit_snapshots.parquet", &snap_schema)?),
            summaries: Some(open(dir, "tick_summaries.parquet", &summ_schema)?),
            events:    Some(open(dir, "cell_events.parquet", &event_schema)?),
            snap_schema,
            summ_schema,
            event_schema,
            summ_buf:  Vec::new(),
            event_buf: Vec::new(),
        })
    }

    fn flush_summaries(&mut self) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };
        if self.summ_buf.is_empty() {
            return Ok(());
        }
        let mut ticks     = UInt64Builder::new();
        let mut moving    = UInt64Builder::new();
        let mut blocked   = UInt64Builder::new();
        let mut events    = UInt64Builder::new();
        let mut destroyed = UInt64Builder::new();
        for row in self.summ_buf.drain(..) {
            ticks.append_value(row.tick);
            moving.append_value(row.moving);
            blocked.append_value(row.blocked);
            events.append_value(row.events);
            destroyed.append_value(row.destroyed);
        }
        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(moving.finish()),
                Arc::new(blocked.finish()),
                Arc::new(events.finish()),
                Arc::new(destroyed.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn flush_events(&mut self) -> OutputResult<()> {
        let Some(writer) = self.events.as_mut() else {
            return Ok(());
        };
        if self.event_buf.is_empty() {
            return Ok(());
        }
        let mut ticks = UInt64Builder::new();
        let mut units = UInt32Builder::new();
        let mut kinds = StringBuilder::new();
        let mut xs    = Int32Builder::new();
        let mut ys    = Int32Builder::new();
        for row in self.event_buf.drain(..) {
            ticks.append_value(row.tick);
            units.append_value(row.unit_id);
            kinds.append_value(row.kind);
            xs.append_value(row.cell_x);
            ys.append_value(row.cell_y);
        }
        let batch = RecordBatch::try_new(
            Arc::clone(&self.event_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(units.finish()),
                Arc::new(kinds.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[UnitSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut ticks   = UInt64Builder::new();
        let mut units   = UInt32Builder::new();
        let mut houses  = UInt8Builder::new();
        let mut xs      = Int32Builder::new();
        let mut ys      = Int32Builder::new();
        let mut facings = UInt8Builder::new();
        let mut status  = StringBuilder::new();
        let mut tracks  = UInt8Builder::new();
        let mut alive   = BooleanBuilder::new();

        for row in rows {
            ticks.append_value(row.tick);
            units.append_value(row.unit_id);
            houses.append_value(row.house);
            xs.append_value(row.x);
            ys.append_value(row.y);
            facings.append_value(row.facing);
            status.append_value(row.status);
            tracks.append_option(row.track);
            alive.append_value(row.alive);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(units.finish()),
                Arc::new(houses.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(facings.finish()),
                Arc::new(status.finish()),
                Arc::new(tracks.finish()),
                Arc::new(alive.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summ_buf.push(*row);
        Ok(())
    }

    fn write_cell_event(&mut self, row: &CellEventRow) -> OutputResult<()> {
        self.event_buf.push(*row);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.flush_summaries()?;
        self.flush_events()?;
        for writer in [self.snapshots.take(), self.summaries.take(), self.events.take()].into_iter().flatten() {
            writer.close()?;
        }
        Ok(())
    }
}
