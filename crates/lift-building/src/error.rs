//! Building construction errors.

use lift_core::FloorId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildingError {
    #[error("a building needs at least two floors, got {0}")]
    TooFewFloors(usize),

    #[error("a building needs at least one elevator car")]
    NoElevators,

    #[error("start floor {floor} is outside a building of {floors} floors")]
    StartFloorOutOfRange { floor: FloorId, floors: usize },
}

pub type BuildingResult<T> = Result<T, BuildingError>;
