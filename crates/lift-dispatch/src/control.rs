//! The control system: owns the hall queue and the active policy, and fans
//! building events out to it.

use lift_building::{Building, CarEvent, FloorEvent};
use lift_core::SimClock;
use lift_traffic::ArrivalSchedule;
use log::debug;

use crate::policy::{DispatchCtx, HallQueue, SchedulingPolicy};

/// Event router between the physical layer and the active policy.
///
/// The control system is the only writer of the hall queue: calls enter on
/// `Arrived`, leave on `Boarded`.  It also owns the boarding commit — the
/// policy's `passenger_boarded` hook runs first, so a re-route issued there
/// lands before the car commits the destination stop.
pub struct ControlSystem {
    hall:   HallQueue,
    policy: Box<dyn SchedulingPolicy>,
}

impl ControlSystem {
    pub fn new(policy: Box<dyn SchedulingPolicy>) -> Self {
        ControlSystem { hall: HallQueue::new(), policy }
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn hall(&self) -> &HallQueue {
        &self.hall
    }

    /// Fire `on_idle` for every car.  Called once before the first tick so
    /// policies with parking rules position the bank from the start.
    pub fn bootstrap(
        &mut self,
        clock: &SimClock,
        building: &mut Building,
        schedule: &mut ArrivalSchedule,
    ) {
        let ControlSystem { hall, policy } = self;
        let mut ctx = DispatchCtx { clock, building, hall, schedule };
        for i in 0..ctx.building.elevators().len() {
            let id = ctx.building.elevators()[i].id();
            policy.on_idle(id, &mut ctx);
        }
    }

    /// Route one floor event.
    pub fn on_floor_event(
        &mut self,
        event: &FloorEvent,
        clock: &SimClock,
        building: &mut Building,
        schedule: &mut ArrivalSchedule,
    ) {
        match event {
            FloorEvent::Arrived(call) => {
                self.hall.push(*call);
                let ControlSystem { hall, policy } = self;
                let mut ctx = DispatchCtx { clock, building, hall, schedule };
                policy.passenger_arrived(*call, &mut ctx);
            }
            FloorEvent::Boarded { elevator, passenger } => {
                self.hall.remove(*passenger);
                {
                    let ControlSystem { hall, policy } = self;
                    let mut ctx = DispatchCtx { clock, building, hall, schedule };
                    policy.passenger_boarded(*elevator, *passenger, &mut ctx);
                }
                // Commit after the hook so a re-route shapes the stop.
                building.elevator_mut(*elevator).commit_destination(*passenger);
            }
        }
    }

    /// Route one car event.
    pub fn on_car_event(
        &mut self,
        event: &CarEvent,
        clock: &SimClock,
        building: &mut Building,
        schedule: &mut ArrivalSchedule,
    ) {
        let ControlSystem { hall, policy } = self;
        let mut ctx = DispatchCtx { clock, building, hall, schedule };
        match event {
            CarEvent::Exited { elevator, passenger } => {
                policy.passenger_exited(*elevator, passenger, &mut ctx);
            }
            CarEvent::Idle(elevator) => policy.on_idle(*elevator, &mut ctx),
            CarEvent::Turned(elevator) => policy.on_turned(*elevator, &mut ctx),
        }
    }

    /// The per-tick policy update, after floors and cars have run.
    pub fn update(
        &mut self,
        clock: &SimClock,
        building: &mut Building,
        schedule: &mut ArrivalSchedule,
    ) {
        let ControlSystem { hall, policy } = self;
        let mut ctx = DispatchCtx { clock, building, hall, schedule };
        policy.update(&mut ctx);
    }

    /// Drop all hall calls and let the policy rebuild its bookkeeping.
    pub fn reset(
        &mut self,
        clock: &SimClock,
        building: &mut Building,
        schedule: &mut ArrivalSchedule,
    ) {
        debug!("control system reset, dropping {} open hall calls", self.hall.len());
        self.hall.clear();
        let ControlSystem { hall, policy } = self;
        let mut ctx = DispatchCtx { clock, building, hall, schedule };
        policy.activated(&mut ctx);
    }
}
