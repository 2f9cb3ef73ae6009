//! Zoned dispatch: each car serves only its own slice of the building.

use lift_building::MotionState;
use lift_core::{ElevatorId, FloorId};
use log::trace;

use crate::policy::{DispatchCtx, SchedulingPolicy};
use crate::zone::{idle_target, partition_spill, Zone};
use crate::DispatchResult;

/// Partitions floors and cars into contiguous zones once at construction
/// and never dispatches a car outside its zone.  Idle cars park at their
/// zone middle, pre-positioned instead of stranded wherever they drained.
#[derive(Debug)]
pub struct Zoning {
    zones: Vec<Zone>,
}

impl Zoning {
    /// Split `floors` and `cars` into `zones` contiguous zones.  Fails when
    /// the zone count does not fit the building or the bank does not divide
    /// evenly.
    pub fn new(floors: usize, cars: usize, zones: usize) -> DispatchResult<Self> {
        Ok(Zoning { zones: partition_spill(floors, cars, zones)? })
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    fn zone_of_floor(&self, floor: FloorId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.contains(floor))
    }

    fn zone_of_car(&self, id: ElevatorId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.cars().contains(&id))
    }
}

impl SchedulingPolicy for Zoning {
    fn name(&self) -> &'static str {
        "zoning"
    }

    fn update(&mut self, ctx: &mut DispatchCtx<'_>) {
        let hall = ctx.hall;
        for call in hall.iter() {
            let Some(zone) = self.zone_of_floor(call.floor) else {
                continue;
            };
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
        trace!("zoning: idle car {elevator} heads to {target}");
        ctx.building.elevator_mut(elevator).move_towards(target);
    }
}
