//! `dr-output` — simulation output writers for the rust_drive framework.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                                      |
//! |-----------|---------|--------------------------------------------------------------------|
//! | *(none)*  | CSV     | `unit_snapshots.csv`, `tick_summaries.csv`, `cell_events.csv`      |
//! | `sqlite`  | SQLite  | `output.db`                                                        |
//! | `parquet` | Parquet | `unit_snapshots.parquet`, `tick_summaries.parquet`, `cell_events.parquet` |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SnapshotObserver`], which implements `dr_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dr_output::{CsvWriter, SnapshotObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SnapshotObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SnapshotObserver;
pub use row::{CellEventRow, TickSummaryRow, UnitSnapshotRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
