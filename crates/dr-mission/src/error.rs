use thiserror::Error;

use dr_core::BuildingId;

#[derive(Debug, Error)]
pub enum MissionError {
    #[error("building {0} is already registered")]
    DuplicateBuilding(BuildingId),

    #[error("building {0} not found")]
    UnknownBuilding(BuildingId),
}

pub type MissionResult<T> = Result<T, MissionError>;
