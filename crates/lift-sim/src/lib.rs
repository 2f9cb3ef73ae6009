//! `lift-sim` — tick loop orchestrator for the liftsim elevator-bank
//! simulator.
//!
//! # Tick pipeline
//!
//! ```text
//! while not finished:
//!   ① Floors   — waiting passengers board dwelling cars; due schedule
//!                entries inject; stochastic sampling while the horizon
//!                is open (skipped entirely in replay mode).
//!   ② Events   — Arrived → hall queue + policy hook (+ observer);
//!                Boarded → call removed, re-route hook, stop committed.
//!   ③ Cars     — every state machine advances one tick; Exited, Idle
//!                and Turned events fan out like floor events.
//!   ④ Policy   — one ControlSystem::update over this tick's hall queue.
//!   ⑤ Observer — on_tick, then the clock steps.
//! ```
//!
//! The run terminates once the horizon has passed, every floor queue and
//! manifest has drained, and no planned arrival is due; `on_done` fires
//! exactly once.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Samples floor arrivals on Rayon's thread pool.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::{Scenario, SimSettings};
//! use lift_dispatch::PolicyKind;
//! use lift_sim::{NoopObserver, SimBuilder};
//! use lift_traffic::IntervalProfile;
//!
//! let policy = PolicyKind::CollectiveControl.build(scenario.floor_count(), 2)?;
//! let mut sim = SimBuilder::new(scenario, Box::new(IntervalProfile::week_day()), policy)
//!     .settings(SimSettings { seed: 42, ..Default::default() })
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! println!("total energy: {:.1}", sim.building.total_energy());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Simulator;
