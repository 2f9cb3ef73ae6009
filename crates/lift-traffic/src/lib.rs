//! `lift-traffic` — passenger demand for the `liftsim` elevator-bank simulator.
//!
//! Everything about *when* passengers appear and *where* they go, with no
//! knowledge of cars or dispatch:
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`profile`]  | `TrafficProfile` trait, `IntervalProfile` tables,      |
//! |              | exponential inter-arrival sampling                     |
//! | [`sampler`]  | `DestinationSampler` (weighted floor draw)             |
//! | [`schedule`] | `ArrivalSchedule` replay queue + CSV loader            |
//! | [`error`]    | `TrafficError`, `TrafficResult`                        |

pub mod error;
pub mod profile;
pub mod sampler;
pub mod schedule;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TrafficError, TrafficResult};
pub use profile::{IntervalProfile, TrafficInterval, TrafficProfile, exponential_gap};
pub use sampler::DestinationSampler;
pub use schedule::{ArrivalSchedule, ScheduledArrival, load_schedule_csv, load_schedule_reader};
