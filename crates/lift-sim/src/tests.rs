//! Integration tests for lift-sim.

use lift_building::{Building, BuildingError};
use lift_core::{
    ElevatorConfig, ElevatorId, FloorId, HallCall, Passenger, PassengerId, Scenario, SimClock,
    SimSettings, SimTime,
};
use lift_dispatch::PolicyKind;
use lift_traffic::{IntervalProfile, ScheduledArrival};

use crate::{SimBuilder, SimError, SimObserver, Simulator};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn scenario(floors: usize, cars: u32) -> Scenario {
    Scenario {
        name: "test".into(),
        residents: vec![10; floors],
        elevators: cars,
        start_floor: FloorId::LOBBY,
        car: ElevatorConfig {
            capacity: 4,
            start_time_secs: 1.0,
            floor_time_secs: 1.0,
            stop_time_secs: 1.0,
            door_time_secs: 1.0,
        },
    }
}

fn settings(horizon_secs: f64) -> SimSettings {
    SimSettings { tick_secs: 0.5, horizon_secs, seed: 7 }
}

/// Profile that never produces arrivals on its own.
fn quiet() -> Box<IntervalProfile> {
    Box::new(IntervalProfile::uniform(0.0))
}

fn collective(floors: usize, cars: usize) -> Box<dyn lift_dispatch::SchedulingPolicy> {
    PolicyKind::CollectiveControl.build(floors, cars).unwrap()
}

fn arrival(at_secs: f64, floor: u32, destination: u32) -> ScheduledArrival {
    ScheduledArrival {
        at: SimTime(SimClock::secs_to_duration(at_secs)),
        floor: FloorId(floor),
        destination: FloorId(destination),
    }
}

fn at_secs(secs: f64) -> SimTime {
    SimTime(SimClock::secs_to_duration(secs))
}

/// Records every observer callback for later assertions.
#[derive(Default)]
struct Recorder {
    generated: Vec<HallCall>,
    exits:     Vec<(SimTime, ElevatorId, Passenger)>,
    ticks:     usize,
    done:      usize,
}

impl SimObserver for Recorder {
    fn on_passenger_generated(&mut self, call: &HallCall) {
        self.generated.push(*call);
    }

    fn on_passenger_exited(&mut self, now: SimTime, elevator: ElevatorId, passenger: &Passenger) {
        self.exits.push((now, elevator, passenger.clone()));
    }

    fn on_tick(&mut self, _now: SimTime, _building: &Building) {
        self.ticks += 1;
    }

    fn on_done(&mut self, _now: SimTime, _building: &Building) {
        self.done += 1;
    }
}

/// `run` with a tick cap so a dispatch regression fails instead of hanging.
fn run_bounded(sim: &mut Simulator, observer: &mut Recorder) {
    for _ in 0..1_000_000 {
        if !sim.advance(observer) {
            return;
        }
    }
    panic!("simulation did not terminate within the tick cap");
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(scenario(4, 2), quiet(), collective(4, 2))
            .build()
            .unwrap();
        assert_eq!(sim.name, "test");
        assert_eq!(sim.building.floor_count(), 4);
        assert_eq!(sim.clock.now(), SimTime::ZERO);
        assert!(!sim.is_done());
    }

    #[test]
    fn rejects_single_floor() {
        let result = SimBuilder::new(scenario(1, 1), quiet(), collective(1, 1)).build();
        assert!(matches!(
            result.unwrap_err(),
            SimError::Building(BuildingError::TooFewFloors(1))
        ));
    }

    #[test]
    fn rejects_empty_fleet() {
        let result = SimBuilder::new(scenario(4, 0), quiet(), collective(4, 1)).build();
        assert!(matches!(
            result.unwrap_err(),
            SimError::Building(BuildingError::NoElevators)
        ));
    }

    #[test]
    fn rejects_start_floor_outside_the_building() {
        let mut s = scenario(4, 1);
        s.start_floor = FloorId(9);
        let result = SimBuilder::new(s, quiet(), collective(4, 1)).build();
        assert!(matches!(
            result.unwrap_err(),
            SimError::Building(BuildingError::StartFloorOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_nonpositive_tick_length() {
        for tick_secs in [0.0, -1.0, f64::NAN] {
            let result = SimBuilder::new(scenario(4, 1), quiet(), collective(4, 1))
                .settings(SimSettings { tick_secs, ..settings(60.0) })
                .build();
            assert!(matches!(result.unwrap_err(), SimError::TickLength(_)));
        }
    }

    #[test]
    fn rejects_negative_horizon() {
        let result = SimBuilder::new(scenario(4, 1), quiet(), collective(4, 1))
            .settings(settings(-1.0))
            .build();
        assert!(matches!(result.unwrap_err(), SimError::Horizon(_)));
    }

    #[test]
    fn rejects_zero_capacity() {
        let mut s = scenario(4, 1);
        s.car.capacity = 0;
        let result = SimBuilder::new(s, quiet(), collective(4, 1)).build();
        assert!(matches!(result.unwrap_err(), SimError::ZeroCapacity));
    }
}

// ── Run loop and termination ──────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn quiet_run_terminates_at_the_horizon() {
        let mut sim = SimBuilder::new(scenario(4, 1), quiet(), collective(4, 1))
            .settings(settings(5.0))
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs);

        assert!(sim.is_done());
        assert_eq!(obs.done, 1);
        // 0.5 s ticks: the tick ending at 5.0 s is the last one processed.
        assert_eq!(obs.ticks, 10);
        assert_eq!(sim.clock.now(), at_secs(5.0));
        assert!(obs.generated.is_empty());
    }

    #[test]
    fn done_fires_once_across_repeated_runs() {
        let mut sim = SimBuilder::new(scenario(4, 1), quiet(), collective(4, 1))
            .settings(settings(2.0))
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs);
        sim.run(&mut obs);
        assert!(!sim.advance(&mut obs));
        assert_eq!(obs.done, 1);
    }

    #[test]
    fn advance_steps_exactly_one_tick() {
        let mut sim = SimBuilder::new(scenario(4, 1), quiet(), collective(4, 1))
            .settings(settings(2.0))
            .build()
            .unwrap();
        let mut obs = Recorder::default();

        let mut results = Vec::new();
        loop {
            let running = sim.advance(&mut obs);
            results.push(running);
            if !running {
                break;
            }
        }
        // Ticks at 0.0, 0.5, 1.0, 1.5 s; the fourth crosses the horizon.
        assert_eq!(results, vec![true, true, true, false]);
        assert_eq!(obs.ticks, 4);
    }

    #[test]
    fn single_trip_end_to_end() {
        let mut sim = SimBuilder::new(scenario(4, 1), quiet(), collective(4, 1))
            .settings(settings(1.0))
            .replay(vec![arrival(1.0, 2, 0)])
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs);

        assert_eq!(obs.generated.len(), 1);
        let call = obs.generated[0];
        assert_eq!(call.floor, FloorId(2));
        assert_eq!(call.destination, FloorId(0));

        assert_eq!(obs.exits.len(), 1);
        let (exit_at, car, p) = &obs.exits[0];
        assert_eq!(*car, ElevatorId(0));
        assert_eq!(p.destination(), FloorId(0));
        assert_eq!(p.created_at(), at_secs(1.0));
        let boarded = p.boarded_at().expect("delivered passengers boarded");
        assert!(boarded > p.created_at(), "boarding strictly follows arrival");
        assert!(*exit_at > boarded, "delivery strictly follows boarding");

        assert!(sim.building.floors_empty());
        assert!(sim.building.manifests_empty());
        assert_eq!(obs.done, 1);
    }

    #[test]
    fn entries_planned_beyond_the_horizon_do_not_hold_the_run_open() {
        // Horizon 1 s, arrival planned at 4 s: the entry never becomes due
        // while the run drains, so the run ends without it.  Only due
        // entries (like mid-run transfer injections) extend a run.
        let mut sim = SimBuilder::new(scenario(4, 1), quiet(), collective(4, 1))
            .settings(settings(1.0))
            .replay(vec![arrival(4.0, 1, 3)])
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs);

        assert!(obs.generated.is_empty());
        assert!(obs.exits.is_empty());
        assert_eq!(sim.clock.now(), at_secs(1.0));
        assert_eq!(obs.done, 1);
    }
}

// ── Reset and determinism ─────────────────────────────────────────────────────

#[cfg(test)]
mod reset_tests {
    use super::*;

    #[test]
    fn reset_restores_the_planned_arrivals() {
        let plan = vec![arrival(0.5, 2, 0), arrival(1.0, 3, 0)];
        let mut sim = SimBuilder::new(scenario(4, 2), quiet(), collective(4, 2))
            .settings(settings(1.0))
            .replay(plan)
            .build()
            .unwrap();

        let mut first = Recorder::default();
        sim.run(&mut first);
        assert_eq!(first.exits.len(), 2);

        sim.reset(11);
        assert!(!sim.is_done());
        assert_eq!(sim.clock.now(), SimTime::ZERO);

        let mut second = Recorder::default();
        sim.run(&mut second);
        assert_eq!(second.exits.len(), 2);
        // The id allocator restarts too, so the runs are comparable row for row.
        let ids = |r: &Recorder| r.exits.iter().map(|(_, _, p)| p.id()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn same_seed_reruns_identically() {
        let busy = Scenario { residents: vec![0, 120, 120, 120], ..scenario(4, 2) };
        let mut sim = SimBuilder::new(busy, Box::new(IntervalProfile::uniform(0.35)), collective(4, 2))
            .settings(SimSettings { seed: 5, ..settings(1800.0) })
            .build()
            .unwrap();

        let trace = |obs: &Recorder| {
            obs.generated
                .iter()
                .map(|c| (c.passenger, c.floor, c.destination, c.placed_at))
                .collect::<Vec<_>>()
        };

        let mut first = Recorder::default();
        run_bounded(&mut sim, &mut first);

        sim.reset(5);
        let mut second = Recorder::default();
        run_bounded(&mut sim, &mut second);

        assert!(!first.generated.is_empty(), "half an hour of uniform traffic");
        assert_eq!(trace(&first), trace(&second));
        assert_eq!(first.exits.len(), second.exits.len());
    }

    #[test]
    fn generation_stops_at_the_horizon() {
        let busy = Scenario { residents: vec![0, 120, 120, 120], ..scenario(4, 2) };
        let horizon = at_secs(1800.0);
        let mut sim = SimBuilder::new(busy, Box::new(IntervalProfile::uniform(0.35)), collective(4, 2))
            .settings(settings(1800.0))
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        run_bounded(&mut sim, &mut obs);

        assert!(!obs.generated.is_empty());
        assert!(obs.generated.iter().all(|c| c.placed_at < horizon));
        // Everyone generated was eventually delivered.
        assert_eq!(obs.exits.len(), obs.generated.len());
        assert_eq!(obs.done, 1);
    }
}

// ── Zoned transfers through the whole stack ───────────────────────────────────

#[cfg(test)]
mod relay_tests {
    use super::*;

    #[test]
    fn high_zoning_relays_a_long_trip_across_zones() {
        // 9 floors in 3 overlapping zones (0..=2, 2..=4, 4..=8) with one car
        // each.  A trip from 0 to 7 crosses both boundaries, so it rides as
        // three legs with transfers at floors 2 and 4.
        let policy = PolicyKind::HighZoning { zones: 3 }.build(9, 3).unwrap();
        let mut sim = SimBuilder::new(scenario(9, 3), quiet(), policy)
            .settings(settings(1.0))
            .replay(vec![arrival(0.0, 0, 7)])
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        run_bounded(&mut sim, &mut obs);

        let legs: Vec<(u32, u32, u32)> = obs
            .generated
            .iter()
            .map(|c| (c.floor.0, c.destination.0, c.passenger.0 as u32))
            .collect();
        assert_eq!(legs.len(), 3, "one planned arrival plus two relays: {legs:?}");
        assert_eq!(legs[0].0, 0);
        assert_eq!(legs[1].0, 2, "first transfer lands on the lower boundary");
        assert_eq!(legs[2].0, 4, "second transfer lands on the upper boundary");
        assert!(legs.iter().all(|&(_, destination, _)| destination == 7));

        let exits: Vec<(u32, bool)> = obs
            .exits
            .iter()
            .map(|(_, _, p)| (p.destination().0, p.is_rerouted()))
            .collect();
        assert_eq!(exits, vec![(2, true), (4, true), (7, false)]);

        // Each leg rides a different zone's car.
        let cars: Vec<ElevatorId> = obs.exits.iter().map(|(_, car, _)| *car).collect();
        assert_eq!(cars, vec![ElevatorId(0), ElevatorId(1), ElevatorId(2)]);

        assert!(sim.building.manifests_empty());
        assert_eq!(obs.done, 1);
    }

    #[test]
    fn fresh_passenger_ids_per_relay_leg() {
        let policy = PolicyKind::HighZoning { zones: 3 }.build(9, 3).unwrap();
        let mut sim = SimBuilder::new(scenario(9, 3), quiet(), policy)
            .settings(settings(1.0))
            .replay(vec![arrival(0.0, 0, 7)])
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        run_bounded(&mut sim, &mut obs);

        let mut ids: Vec<PassengerId> = obs.generated.iter().map(|c| c.passenger).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3, "every leg is its own passenger record");
    }
}
