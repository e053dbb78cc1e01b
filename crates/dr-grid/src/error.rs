//! Grid-subsystem error type.

use thiserror::Error;

use dr_core::Cell;

/// Errors produced by `dr-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("no path from {from} to {to}")]
    NoPath { from: Cell, to: Cell },

    #[error("cell {0} is outside the map")]
    OutOfBounds(Cell),

    #[error("map parse error at row {row}: {msg}")]
    Parse { row: usize, msg: String },
}

pub type GridResult<T> = Result<T, GridError>;
