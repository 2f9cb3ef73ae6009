//! Nearest-car dispatch with a stop-over-dispatch preference.

use lift_building::MotionState;
use lift_core::ElevatorId;

use crate::policy::{DispatchCtx, SchedulingPolicy};

/// How a candidate car would serve a call.  A car that merely has to brake
/// beats one that must start a fresh trip, whatever the distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Serve {
    /// Already cruising into the call's floor; one braking command suffices.
    Stop,
    /// Idle; must be dispatched.
    Dispatch,
}

/// For every hall call, picks one car: the capacity- and direction-eligible
/// candidate with the best `(serve kind, floor distance)` pair.  Ties keep
/// the first car enumerated, so selection is deterministic across runs.
#[derive(Debug, Default)]
pub struct LongestQueueFirst;

impl LongestQueueFirst {
    pub fn new() -> Self {
        LongestQueueFirst
    }
}

impl SchedulingPolicy for LongestQueueFirst {
    fn name(&self) -> &'static str {
        "longest-queue"
    }

    fn update(&mut self, ctx: &mut DispatchCtx<'_>) {
        let hall = ctx.hall;
        for call in hall.iter() {
            let mut best: Option<(Serve, u32, ElevatorId)> = None;
            for car in ctx.building.elevators() {
                if !car.can_accept(call.direction(), call.weight) {
                    continue;
                }
                let serve = match car.state() {
                    MotionState::Moving
                        if car.direction() == call.direction()
                            && car.next_floor() == Some(call.floor) =>
                    {
                        Serve::Stop
                    }
                    // An idle car already on the floor boards directly; only
                    // cars elsewhere need a dispatch.
                    MotionState::Idle if car.floor() != call.floor => Serve::Dispatch,
                    _ => continue,
                };
                let distance = car.floor().distance(call.floor);
                let better = match best {
                    None => true,
                    Some((k, d, _)) => (serve, distance) < (k, d),
                };
                if better {
                    best = Some((serve, distance, car.id()));
                }
            }
            if let Some((serve, _, id)) = best {
                let car = ctx.building.elevator_mut(id);
                match serve {
                    Serve::Stop => car.stop_at_next_floor(),
                    Serve::Dispatch => car.move_towards(call.floor),
                }
            }
        }
    }
}
