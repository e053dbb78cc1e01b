use dr_core::{Cell, DrError, UnitId};
use dr_grid::GridError;
use dr_mission::MissionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),

    #[error("{unit} cannot be placed at {cell}")]
    Placement { unit: UnitId, cell: Cell },

    #[error(transparent)]
    Core(#[from] DrError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Mission(#[from] MissionError),
}

pub type SimResult<T> = Result<T, SimError>;
