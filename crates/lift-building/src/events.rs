//! Tick events handed from the physical layer to the dispatch layer.
//!
//! Floors and cars never call the control system directly.  Each update phase
//! collects its events into a batch and the simulator fans them out once the
//! phase has finished, so the dispatcher always observes a consistent
//! building.  Within a batch, order follows update order: floor 0 upward,
//! then car 0 upward.

use lift_core::{ElevatorId, HallCall, Passenger, PassengerId};

/// Emitted by the floor phase.
#[derive(Clone, Debug)]
pub enum FloorEvent {
    /// A passenger joined a hall queue, freshly generated or replayed from a
    /// schedule.  Carries a snapshot of the call; the passenger itself stays
    /// in the queue.
    Arrived(HallCall),
    /// A waiting passenger stepped into a car dwelling at its floor.  The
    /// destination stop is not committed yet; the dispatcher does that after
    /// it has had a chance to re-route.
    Boarded {
        elevator:  ElevatorId,
        passenger: PassengerId,
    },
}

/// Emitted by the elevator phase.
#[derive(Debug)]
pub enum CarEvent {
    /// A passenger reached the car's current floor and left the manifest.
    /// Ownership of the passenger moves out with the event.
    Exited {
        elevator:  ElevatorId,
        passenger: Passenger,
    },
    /// The car's stop queue drained and it parked without a commitment.
    Idle(ElevatorId),
    /// The car reversed its committed direction to serve stops behind it.
    Turned(ElevatorId),
}
