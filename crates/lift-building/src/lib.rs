//! `lift-building` — the physical model: cars, floors, and the building.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`elevator`] | `Elevator` state machine, `MotionState`, `EnergyMeter`          |
//! | [`floor`]    | `Floor` — hall queue, arrival sampling, direct boarding         |
//! | [`building`] | `Building` — the aggregate and its two tick passes              |
//! | [`events`]   | `FloorEvent`, `CarEvent` — batches handed to the dispatch layer |
//! | [`error`]    | `BuildingError`, `BuildingResult<T>`                            |
//!
//! # Tick passes
//!
//! The building updates in two passes per tick, and the order is part of the
//! contract:
//!
//! 1. [`Building::update_floors`] — every floor boards waiting passengers
//!    into dwelling cars, then generates arrivals (scheduled entries first,
//!    stochastic sampling second).
//! 2. [`Building::update_elevators`] — every car advances its motion state
//!    machine by one tick.
//!
//! Each pass returns its events as a batch instead of calling the dispatcher
//! inline, so dispatch logic always sees the building between passes, never
//! mid-mutation.
//!
//! # Features
//!
//! | Feature    | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Rayon fan-out of the per-floor sampling phase               |
//! | `serde`    | serde derives on the embedded `lift-core` types             |

pub mod building;
pub mod elevator;
pub mod error;
pub mod events;
pub mod floor;

#[cfg(test)]
mod tests;

pub use building::Building;
pub use elevator::{Elevator, EnergyMeter, MotionState};
pub use error::{BuildingError, BuildingResult};
pub use events::{CarEvent, FloorEvent};
pub use floor::Floor;
