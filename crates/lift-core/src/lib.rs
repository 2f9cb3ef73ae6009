//! `lift-core` — foundational types for the `liftsim` elevator-bank simulator.
//!
//! This crate is a dependency of every other `lift-*` crate.  It intentionally
//! has no `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`ids`]       | `PassengerId`, `ElevatorId`, `FloorId`, allocator   |
//! | [`time`]      | `SimTime`, `SimClock`                               |
//! | [`rng`]       | `FloorRng` (per-floor), `SimRng` (run-level)        |
//! | [`direction`] | `Direction` enum                                    |
//! | [`passenger`] | `Passenger`, `HallCall`                             |
//! | [`config`]    | `ElevatorConfig`, `Scenario`, `SimSettings`         |
//! | [`error`]     | `CoreError`, `CoreResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.  |

pub mod config;
pub mod direction;
pub mod error;
pub mod ids;
pub mod passenger;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ElevatorConfig, Scenario, SimSettings};
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use ids::{ElevatorId, FloorId, IdAllocator, PassengerId};
pub use passenger::{HallCall, Passenger};
pub use rng::{FloorRng, SimRng};
pub use time::{NANOS_PER_MINUTE, NANOS_PER_SECOND, SimClock, SimTime};
