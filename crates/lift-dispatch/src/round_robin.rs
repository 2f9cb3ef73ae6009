//! Round-robin assignment with private per-car queues.

use std::collections::VecDeque;

use lift_building::MotionState;
use lift_core::{ElevatorId, FloorId, HallCall, PassengerId};
use log::trace;

use crate::policy::{DispatchCtx, SchedulingPolicy};

/// Spreads hall calls across cars cyclically, ignoring distance entirely.
///
/// Every arrival lands in exactly one car's private FIFO; an idle car serves
/// its own queue head and nothing else.  The up-peak variant parks an idle
/// car with an empty queue at the lobby to pre-position for ground-floor
/// traffic.
#[derive(Debug)]
pub struct RoundRobin {
    /// Per-car FIFO of `(passenger, arrival floor)` assignments.
    queues:  Vec<VecDeque<(PassengerId, FloorId)>>,
    /// Next car to receive an assignment.  Survives activation, so bursts
    /// keep rotating from wherever the cursor last stood.
    cursor:  usize,
    up_peak: bool,
}

impl RoundRobin {
    pub fn new(cars: usize) -> Self {
        RoundRobin {
            queues: (0..cars).map(|_| VecDeque::new()).collect(),
            cursor: 0,
            up_peak: false,
        }
    }

    /// The up-peak variant: empty idle cars return to the lobby.
    pub fn up_peak(cars: usize) -> Self {
        RoundRobin { up_peak: true, ..Self::new(cars) }
    }

    fn assign(&mut self, call: &HallCall) {
        self.queues[self.cursor].push_back((call.passenger, call.floor));
        trace!("round-robin: call at {} assigned to car {}", call.floor, self.cursor);
        self.cursor = (self.cursor + 1) % self.queues.len();
    }

    /// Send an idle car after its queue head, or home if the queue is empty
    /// and the variant parks at the lobby.
    fn serve(&mut self, elevator: ElevatorId, ctx: &mut DispatchCtx<'_>) {
        match self.queues[elevator.index()].pop_front() {
            Some((_, floor)) => ctx.building.elevator_mut(elevator).move_towards(floor),
            None if self.up_peak => {
                ctx.building.elevator_mut(elevator).move_towards(FloorId::LOBBY);
            }
            None => {}
        }
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        if self.up_peak { "round-robin-up-peak" } else { "round-robin" }
    }

    fn passenger_arrived(&mut self, call: HallCall, _ctx: &mut DispatchCtx<'_>) {
        self.assign(&call);
    }

    fn passenger_boarded(
        &mut self,
        _elevator: ElevatorId,
        passenger: PassengerId,
        _ctx: &mut DispatchCtx<'_>,
    ) {
        // Direct boarding may put a passenger on a car other than the one it
        // was assigned to; drop the stale assignment wherever it sits.
        for queue in &mut self.queues {
            queue.retain(|&(id, _)| id != passenger);
        }
    }

    fn on_idle(&mut self, elevator: ElevatorId, ctx: &mut DispatchCtx<'_>) {
        self.serve(elevator, ctx);
    }

    fn activated(&mut self, ctx: &mut DispatchCtx<'_>) {
        for queue in &mut self.queues {
            queue.clear();
        }
        // Rebuild from the shared hall queue in arrival order; the cursor
        // keeps rotating from where it stood.
        for call in ctx.hall.iter() {
            self.assign(call);
        }
    }

    fn update(&mut self, ctx: &mut DispatchCtx<'_>) {
        // Assignments that arrived while a car sat idle would otherwise wait
        // for the next idle event, which never comes.
        for i in 0..ctx.building.elevators().len() {
            let id = ctx.building.elevators()[i].id();
            if ctx.building.elevator(id).state() == MotionState::Idle {
                self.serve(id, ctx);
            }
        }
    }
}
