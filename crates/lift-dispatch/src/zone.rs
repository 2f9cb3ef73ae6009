//! Zones: contiguous floor ranges with a dedicated car subset.
//!
//! Two partitioning arithmetics live here side by side.  They disagree on
//! where remainder floors go, and the zoning policies were tuned against
//! their own variant, so they are kept as written rather than unified:
//!
//! * [`partition_spill`] walks the building with a fractional carry, so
//!   remainder capacity spills toward *later* zones.
//!   10 floors / 3 zones: `0..=2, 3..=5, 6..=9`.
//! * [`partition_overlap`] sizes every zone at the ceiling and starts each
//!   zone on the previous zone's last floor, producing shared boundary
//!   floors (the transfer floors of high-rise zoning); the floor-to-zone map
//!   assigns a boundary to the *upper* zone.
//!   10 floors / 3 zones: `0..=3, 3..=6, 6..=9`.

use lift_core::{ElevatorId, FloorId};
use lift_building::Building;

use crate::error::{DispatchError, DispatchResult};

/// A contiguous floor range and the cars that serve it.
#[derive(Debug, Clone)]
pub struct Zone {
    first: FloorId,
    /// Inclusive.
    last:  FloorId,
    cars:  Vec<ElevatorId>,
}

impl Zone {
    pub fn first(&self) -> FloorId {
        self.first
    }

    pub fn last(&self) -> FloorId {
        self.last
    }

    pub fn cars(&self) -> &[ElevatorId] {
        &self.cars
    }

    pub fn contains(&self, floor: FloorId) -> bool {
        self.first <= floor && floor <= self.last
    }

    /// The parking floor for idle cars, the upper middle of the range.
    pub fn middle(&self) -> FloorId {
        FloorId(self.first.0 + (self.last.0 - self.first.0 + 1) / 2)
    }

    fn floors(&self) -> impl Iterator<Item = FloorId> + '_ {
        (self.first.0..=self.last.0).map(FloorId)
    }
}

// ── Partitioning ──────────────────────────────────────────────────────────────

fn check_shape(floors: usize, cars: usize, zones: usize) -> DispatchResult<()> {
    if zones == 0 || zones > floors {
        return Err(DispatchError::BadZoneCount { floors, zones });
    }
    if cars == 0 || cars % zones != 0 {
        return Err(DispatchError::UnevenZoneSplit { zones, cars });
    }
    Ok(())
}

fn split_cars(cars: usize, zones: usize) -> impl Iterator<Item = Vec<ElevatorId>> {
    let per_zone = cars / zones;
    (0..zones).map(move |z| {
        (z * per_zone..(z + 1) * per_zone)
            .map(|i| ElevatorId(i as u32))
            .collect()
    })
}

/// Exact partition with the fractional remainder spilling into later zones.
///
/// Tracks the ideal (fractional) zone size with a running carry; each zone
/// takes the whole floors accumulated so far.  The epsilon absorbs float
/// error when the carry lands within a hair of a whole floor, and the final
/// zone is pinned to the top of the building.
pub fn partition_spill(floors: usize, cars: usize, zones: usize) -> DispatchResult<Vec<Zone>> {
    check_shape(floors, cars, zones)?;
    let ideal = floors as f64 / zones as f64;
    let mut out = Vec::with_capacity(zones);
    let mut carry = 0.0;
    let mut next = 0u32;
    for (z, cars) in split_cars(cars, zones).enumerate() {
        let mut take = (ideal + carry).floor();
        carry = ideal + carry - take;
        if carry > 1.0 - 1e-5 {
            take += 1.0;
            carry = 0.0;
        }
        let first = next;
        let mut last = first + take as u32 - 1;
        if z == zones - 1 {
            last = floors as u32 - 1;
        }
        out.push(Zone { first: FloorId(first), last: FloorId(last), cars });
        next = last + 1;
    }
    Ok(out)
}

/// Overlapping partition with shared boundary floors.
///
/// Every zone spans `ceil(floors / zones)` floors and begins on the previous
/// zone's last floor; the last zone stretches to the top whatever the
/// arithmetic says.  Returns the zones plus the floor-to-zone index map with
/// each boundary floor owned by the upper zone.
pub fn partition_overlap(
    floors: usize,
    cars: usize,
    zones: usize,
) -> DispatchResult<(Vec<Zone>, Vec<usize>)> {
    check_shape(floors, cars, zones)?;
    let size = floors.div_ceil(zones) as u32;
    let top = floors as u32 - 1;
    let mut out = Vec::with_capacity(zones);
    for (z, cars) in split_cars(cars, zones).enumerate() {
        let first = (z as u32 * (size - 1)).min(top);
        let last = if z == zones - 1 { top } else { (first + size - 1).min(top) };
        out.push(Zone { first: FloorId(first), last: FloorId(last), cars });
    }
    let mut floor_zone = vec![0usize; floors];
    for (z, zone) in out.iter().enumerate() {
        for floor in zone.floors() {
            floor_zone[floor.index()] = z;
        }
    }
    Ok((out, floor_zone))
}

// ── Shared idle rule ──────────────────────────────────────────────────────────

/// Where an idle car should head inside its zone.
///
/// Any waiting floor in the zone wins over parking: the farthest one from
/// the car when the car sits outside the zone's span, the topmost one when
/// it is inside.  With nothing waiting, the car parks at the zone middle.
pub fn idle_target(zone: &Zone, building: &Building, car_floor: FloorId) -> FloorId {
    let waiting: Vec<FloorId> = zone
        .floors()
        .filter(|&f| building.floor(f).has_waiting())
        .collect();
    let target = if zone.contains(car_floor) {
        waiting.last().copied()
    } else {
        waiting.iter().max_by_key(|f| f.distance(car_floor)).copied()
    };
    target.unwrap_or_else(|| zone.middle())
}
