//! Framework error type.
//!
//! Movement outcomes are never errors: blocked cells and failed searches are
//! reported through `MoveType` and booleans.  `DrError` covers API misuse and
//! configuration problems only.

use thiserror::Error;

use crate::{BuildingId, Cell, UnitId};

#[derive(Debug, Error)]
pub enum DrError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("building {0} not found")]
    BuildingNotFound(BuildingId),

    #[error("cell {0} is outside the map")]
    OutOfBounds(Cell),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `dr-*` crates.
pub type DrResult<T> = Result<T, DrError>;
