//! High-rise zoning: zoned dispatch plus boundary transfers.
//!
//! Cars still never leave their zone.  A passenger whose destination lies
//! outside the boarding car's zone is re-routed to the zone boundary; when
//! they step out there, a continuation arrival with the true destination is
//! injected at the boundary floor for the neighbouring zone's service to
//! pick up.  Long trips become a chain of transfers rather than a
//! single-seat ride.

use lift_building::MotionState;
use lift_core::{Direction, ElevatorId, FloorId, Passenger, PassengerId};
use lift_traffic::ScheduledArrival;
use log::{debug, trace};

use crate::policy::{DispatchCtx, SchedulingPolicy};
use crate::zone::{idle_target, partition_overlap, Zone};
use crate::DispatchResult;

/// Zoned dispatch over an overlapping partition with relay transfers at the
/// shared boundary floors.
#[derive(Debug)]
pub struct HighZoning {
    zones:      Vec<Zone>,
    /// Floor index to zone index; boundary floors belong to the upper zone.
    floor_zone: Vec<usize>,
}

impl HighZoning {
    pub fn new(floors: usize, cars: usize, zones: usize) -> DispatchResult<Self> {
        let (zones, floor_zone) = partition_overlap(floors, cars, zones)?;
        Ok(HighZoning { zones, floor_zone })
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    fn zone_of_car(&self, id: ElevatorId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.cars().contains(&id))
    }

    /// The boundary a rider of `car_zone` must transfer at to continue
    /// toward `destination`, or `None` when the ride fits the zone.
    fn clip_floor(car_zone: &Zone, destination: FloorId) -> Option<FloorId> {
        if destination > car_zone.last() {
            Some(car_zone.last())
        } else if destination < car_zone.first() {
            Some(car_zone.first())
        } else {
            None
        }
    }
}

impl SchedulingPolicy for HighZoning {
    fn name(&self) -> &'static str {
        "high-zoning"
    }

    /// Clip out-of-zone destinations before the stop is committed.
    fn passenger_boarded(
        &mut self,
        elevator: ElevatorId,
        passenger: PassengerId,
        ctx: &mut DispatchCtx<'_>,
    ) {
        let Some(zone) = self.zone_of_car(elevator) else {
            return;
        };
        let car = ctx.building.elevator_mut(elevator);
        let Some(p) = car.passenger_mut(passenger) else {
            return;
        };
        let Some(boundary) = Self::clip_floor(zone, p.destination()) else {
            return;
        };
        // A clip onto the boarding floor would be a zero-length ride; let
        // the car carry the passenger through on the original destination.
        if boundary == p.arrival_floor() {
            return;
        }
        debug!(
            "high-zoning: passenger {} clipped from {} to boundary {}",
            p.id(),
            p.destination(),
            boundary,
        );
        p.reroute_to(boundary);
    }

    /// Inject the continuation trip when a re-routed passenger transfers.
    fn passenger_exited(
        &mut self,
        _elevator: ElevatorId,
        passenger: &Passenger,
        ctx: &mut DispatchCtx<'_>,
    ) {
        if !passenger.is_rerouted() {
            return;
        }
        let continuation = ScheduledArrival {
            at: ctx.now(),
            floor: passenger.destination(),
            destination: passenger.original_destination(),
        };
        debug!(
            "high-zoning: relay at {} continues to {}",
            continuation.floor, continuation.destination,
        );
        ctx.schedule.inject_front(continuation);
    }

    fn update(&mut self, ctx: &mut DispatchCtx<'_>) {
        let hall = ctx.hall;
        for call in hall.iter() {
            let zone_index = self.floor_zone[call.floor.index()];
            let zone = &self.zones[zone_index];

            // A downward call on the zone's bottom boundary cannot be served
            // from inside: the span ends there.  Hand it to the zone below,
            // whose top floor this is.
            if call.floor == zone.first() && call.direction() == Direction::Down && zone_index > 0
            {
                let below = &self.zones[zone_index - 1];
                if let Some(&last_car) = below.cars().last() {
                    trace!(
                        "high-zoning: boundary call at {} handed down to car {last_car}",
                        call.floor,
                    );
                    ctx.building.elevator_mut(last_car).move_towards(call.floor);
                }
                continue;
            }

            for &id in zone.cars() {
                let car = ctx.building.elevator_mut(id);
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

    fn on_idle(&mut self, elevator: ElevatorId, ctx: &mut DispatchCtx<'_>) {
        let Some(zone) = self.zone_of_car(elevator) else {
            return;
        };
        let here = ctx.building.elevator(elevator).floor();
        let target = idle_target(zone, ctx.building, here);
        ctx.building.elevator_mut(elevator).move_towards(target);
    }
}
