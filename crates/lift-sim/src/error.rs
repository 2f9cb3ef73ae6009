use lift_building::BuildingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("tick length must be positive, got {0} s")]
    TickLength(f64),

    #[error("generation horizon must be non-negative, got {0} s")]
    Horizon(f64),

    #[error("car capacity must be positive")]
    ZeroCapacity,

    #[error("invalid building: {0}")]
    Building(#[from] BuildingError),
}

pub type SimResult<T> = Result<T, SimError>;
