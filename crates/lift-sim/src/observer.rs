//! Simulation observer trait for progress reporting and data collection.

use lift_building::Building;
use lift_core::{ElevatorId, HallCall, Passenger, SimTime};

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — wait-time printer
///
/// ```rust,ignore
/// struct WaitPrinter;
///
/// impl SimObserver for WaitPrinter {
///     fn on_passenger_exited(&mut self, now: SimTime, _car: ElevatorId, p: &Passenger) {
///         let waited = p.boarded_at().expect("rode a car").since(p.created_at());
///         println!("[{now}] passenger {} waited {:.1} s", p.id(),
///             SimClock::duration_to_secs(waited));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called when a passenger appears on a floor and places a hall call,
    /// whether sampled from the traffic profile or injected from a schedule.
    fn on_passenger_generated(&mut self, _call: &HallCall) {}

    /// Called when a car delivers a passenger.  `passenger` carries the full
    /// trip record (creation, boarding, destination, re-route history).
    fn on_passenger_exited(&mut self, _now: SimTime, _elevator: ElevatorId, _passenger: &Passenger) {
    }

    /// Called at the end of every tick, after the policy update and before
    /// the clock steps.
    fn on_tick(&mut self, _now: SimTime, _building: &Building) {}

    /// Called exactly once, when the run terminates.
    fn on_done(&mut self, _now: SimTime, _building: &Building) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
