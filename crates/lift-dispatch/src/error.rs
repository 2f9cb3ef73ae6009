//! Dispatch-layer construction errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{cars} cars cannot be split evenly across {zones} zones")]
    UnevenZoneSplit { zones: usize, cars: usize },

    #[error("cannot split {floors} floors into {zones} zones")]
    BadZoneCount { floors: usize, zones: usize },

    #[error("policy index {index} is out of range, only {count} policies are registered")]
    PolicyIndexOutOfRange { index: usize, count: usize },

    #[error("a switching policy needs at least one inner policy")]
    NoPolicies,
}

pub type DispatchResult<T> = Result<T, DispatchError>;
