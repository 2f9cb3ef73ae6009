//! The building aggregate: floors, the elevator bank, and the traffic
//! profile that drives arrivals.

use lift_core::{ElevatorId, FloorId, IdAllocator, Scenario, SimTime};
use lift_traffic::{ArrivalSchedule, TrafficProfile};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::elevator::Elevator;
use crate::error::{BuildingError, BuildingResult};
use crate::events::{CarEvent, FloorEvent};
use crate::floor::Floor;

/// Floors and cars under one roof.
///
/// The building owns the physical state and exposes exactly two update
/// passes, one per entity kind.  Each pass mutates only its own entities and
/// returns an event batch; the simulator interleaves dispatch between the
/// passes.
pub struct Building {
    floors:      Vec<Floor>,
    elevators:   Vec<Elevator>,
    profile:     Box<dyn TrafficProfile>,
    /// Resident counts by floor, handed to the profile on every query.
    residents:   Vec<u32>,
    start_floor: FloorId,
}

impl std::fmt::Debug for Building {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Building")
            .field("floors", &self.floors)
            .field("elevators", &self.elevators)
            .field("residents", &self.residents)
            .field("start_floor", &self.start_floor)
            .finish_non_exhaustive()
    }
}

impl Building {
    /// Assemble a building from a scenario.
    ///
    /// Rejects degenerate shapes outright: fewer than two floors, an empty
    /// elevator bank, or a start floor outside the building.
    pub fn new(
        scenario: &Scenario,
        profile: Box<dyn TrafficProfile>,
        run_seed: u64,
    ) -> BuildingResult<Self> {
        let floor_count = scenario.floor_count();
        if floor_count < 2 {
            return Err(BuildingError::TooFewFloors(floor_count));
        }
        if scenario.elevators == 0 {
            return Err(BuildingError::NoElevators);
        }
        if scenario.start_floor.index() >= floor_count {
            return Err(BuildingError::StartFloorOutOfRange {
                floor:  scenario.start_floor,
                floors: floor_count,
            });
        }
        let floors = scenario
            .residents
            .iter()
            .enumerate()
            .map(|(i, &residents)| Floor::new(FloorId(i as u32), residents, run_seed))
            .collect();
        let elevators = (0..scenario.elevators)
            .map(|i| Elevator::new(ElevatorId(i), scenario.start_floor, &scenario.car))
            .collect();
        Ok(Building {
            floors,
            elevators,
            profile,
            residents: scenario.residents.clone(),
            start_floor: scenario.start_floor,
        })
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor(&self, id: FloorId) -> &Floor {
        &self.floors[id.index()]
    }

    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn elevators_mut(&mut self) -> &mut [Elevator] {
        &mut self.elevators
    }

    pub fn elevator(&self, id: ElevatorId) -> &Elevator {
        &self.elevators[id.index()]
    }

    pub fn elevator_mut(&mut self, id: ElevatorId) -> &mut Elevator {
        &mut self.elevators[id.index()]
    }

    pub fn residents(&self) -> &[u32] {
        &self.residents
    }

    /// `true` when no hall queue holds a passenger.
    pub fn floors_empty(&self) -> bool {
        self.floors.iter().all(|f| !f.has_waiting())
    }

    /// `true` when no car carries a passenger.
    pub fn manifests_empty(&self) -> bool {
        self.elevators.iter().all(|e| e.manifest().is_empty())
    }

    /// Combined energy drawn by the bank so far.
    pub fn total_energy(&self) -> f64 {
        self.elevators.iter().map(|e| e.energy().total()).sum()
    }

    // ── Tick passes ────────────────────────────────────────────────────────

    /// The floor pass: direct boarding, then arrival generation.
    ///
    /// Boarding runs first so a passenger generated this tick never boards
    /// in the same tick.  Scheduled arrivals drain head-first regardless of
    /// `open`; stochastic sampling stops once the horizon closes and is
    /// skipped entirely in replay mode.
    pub fn update_floors(
        &mut self,
        now: SimTime,
        dt_ns: u64,
        open: bool,
        replay: bool,
        schedule: &mut ArrivalSchedule,
        ids: &mut IdAllocator,
    ) -> Vec<FloorEvent> {
        let mut events = Vec::new();

        for floor in &mut self.floors {
            floor.board_waiting(&mut self.elevators, now, &mut events);
        }

        let mut injected = vec![false; self.floors.len()];
        for (i, floor) in self.floors.iter_mut().enumerate() {
            if let Some(entry) = schedule.pop_due(now, floor.id()) {
                floor.inject(entry, now, ids, &mut events);
                injected[i] = true;
            }
        }

        if !replay {
            let pending = self.sample_floors(now, dt_ns, open, &injected);
            for (i, floor) in self.floors.iter_mut().enumerate() {
                if let Some(destination) = pending[i] {
                    floor.admit_sampled(destination, now, ids, &mut events);
                }
            }
        }

        events
    }

    /// Run the per-floor sampling phase.  Floors are independent here, which
    /// is what the `parallel` feature exploits; the later injection pass
    /// stays sequential because it allocates IDs in floor order.
    fn sample_floors(
        &mut self,
        now: SimTime,
        dt_ns: u64,
        open: bool,
        injected: &[bool],
    ) -> Vec<Option<FloorId>> {
        // Split borrow: floors mutate while the profile and census are read.
        let Building { floors, profile, residents, .. } = self;
        let profile: &dyn TrafficProfile = profile.as_ref();
        let residents: &[u32] = residents;

        #[cfg(feature = "parallel")]
        {
            floors
                .par_iter_mut()
                .enumerate()
                .map(|(i, floor)| {
                    floor.sample_arrival(profile, residents, now, dt_ns, !open || injected[i])
                })
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            floors
                .iter_mut()
                .enumerate()
                .map(|(i, floor)| {
                    floor.sample_arrival(profile, residents, now, dt_ns, !open || injected[i])
                })
                .collect()
        }
    }

    /// The elevator pass: advance every car by one tick.
    pub fn update_elevators(&mut self, dt_ns: u64, now: SimTime) -> Vec<CarEvent> {
        let mut events = Vec::new();
        for car in &mut self.elevators {
            car.update(dt_ns, now, &mut events);
        }
        events
    }

    /// Return the building to its initial state under a new seed: hall
    /// queues emptied, arrival streams re-seeded, every car parked back at
    /// the start floor.
    pub fn reset(&mut self, run_seed: u64) {
        for floor in &mut self.floors {
            floor.reset(run_seed);
        }
        for car in &mut self.elevators {
            car.reset(self.start_floor);
        }
    }
}
