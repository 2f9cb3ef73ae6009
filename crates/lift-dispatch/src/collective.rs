//! Collective control, the classic relay-logic dispatch rule.

use lift_building::MotionState;
use crate::policy::{DispatchCtx, SchedulingPolicy};

/// For every hall call, every idle car is sent toward the call's floor, and
/// a car already cruising through it in the right direction is told to stop.
///
/// Deliberately greedy: multiple idle cars will converge on the same call,
/// and nothing parks the bank.  Its strength is picking up along the way;
/// its weakness is bunching.
#[derive(Debug, Default)]
pub struct CollectiveControl;

impl CollectiveControl {
    pub fn new() -> Self {
        CollectiveControl
    }
}

impl SchedulingPolicy for CollectiveControl {
    fn name(&self) -> &'static str {
        "collective"
    }

    fn update(&mut self, ctx: &mut DispatchCtx<'_>) {
        let hall = ctx.hall;
        for call in hall.iter() {
            for car in ctx.building.elevators_mut() {
                if !car.can_accept(call.direction(), call.weight) {
                    continue;
                }
                match car.state() {
                    MotionState::Idle => car.move_towards(call.floor),
                    MotionState::Moving
                        if car.direction() == call.direction()
                            && car.next_floor() == Some(call.floor) =>
                    {
                        car.stop_at_next_floor();
                        break;
                    }
                    _ => {}
                }
            }
        }
    }
}
