//! `lift-dispatch` — scheduling policies and the control system.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                  |
//! |-------------------|-----------------------------------------------------------|
//! | [`policy`]        | `SchedulingPolicy` trait, `DispatchCtx`, `HallQueue`      |
//! | [`control`]       | `ControlSystem` — event routing and the boarding commit   |
//! | [`collective`]    | `CollectiveControl`                                       |
//! | [`longest_queue`] | `LongestQueueFirst`                                       |
//! | [`round_robin`]   | `RoundRobin` (plain and up-peak)                          |
//! | [`zone`]          | `Zone` plus both partitioning arithmetics                 |
//! | [`zoning`]        | `Zoning`                                                  |
//! | [`high_zoning`]   | `HighZoning` — zoning with boundary transfers             |
//! | [`switcher`]      | `SwitchingPolicy` + `PolicySwitch` handle                 |
//! | [`registry`]      | `PolicyKind` — named construction                         |
//! | [`error`]         | `DispatchError`, `DispatchResult<T>`                      |
//!
//! # Event contract
//!
//! The control system receives the building's per-tick event batches and
//! forwards them to the single active [`SchedulingPolicy`]:
//!
//! * `Arrived` pushes the hall call, then `passenger_arrived`.
//! * `Boarded` removes the hall call, runs `passenger_boarded` (the policy's
//!   chance to re-route), and only then commits the destination stop.
//! * `Exited`, `Idle`, `Turned` forward to their hooks.
//! * `update` runs once per tick after all floors and cars have moved.
//!
//! Policies command cars through the mutable building in [`DispatchCtx`];
//! commands a car cannot honour are silently dropped by the car itself, so
//! no policy mistake can halt the run.

pub mod collective;
pub mod control;
pub mod error;
pub mod high_zoning;
pub mod longest_queue;
pub mod policy;
pub mod registry;
pub mod round_robin;
pub mod switcher;
pub mod zone;
pub mod zoning;


pub use collective::CollectiveControl;
pub use control::ControlSystem;
pub use error::{DispatchError, DispatchResult};
pub use high_zoning::HighZoning;
pub use longest_queue::LongestQueueFirst;
pub use policy::{DispatchCtx, HallQueue, SchedulingPolicy};
pub use registry::PolicyKind;
pub use round_robin::RoundRobin;
pub use switcher::{PolicySwitch, SwitchingPolicy};
pub use zone::{partition_overlap, partition_spill, Zone};
pub use zoning::Zoning;
