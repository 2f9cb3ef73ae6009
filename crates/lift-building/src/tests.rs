//! Unit tests for the physical model.

use lift_core::{
    Direction, ElevatorConfig, ElevatorId, FloorId, IdAllocator, Passenger, PassengerId, Scenario,
    SimClock, SimTime,
};
use lift_traffic::{ArrivalSchedule, IntervalProfile, ScheduledArrival};

use crate::elevator::{Elevator, MotionState};
use crate::events::{CarEvent, FloorEvent};
use crate::{Building, BuildingError};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Half-second ticks; every phase below is a whole multiple.
const TICK: u64 = 500_000_000;

/// One second per phase so tick counts are easy to reason about.
fn test_car_config() -> ElevatorConfig {
    ElevatorConfig {
        capacity: 4,
        start_time_secs: 1.0,
        floor_time_secs: 1.0,
        stop_time_secs: 1.0,
        door_time_secs: 1.0,
    }
}

fn car_at(floor: u32) -> Elevator {
    Elevator::new(ElevatorId(0), FloorId(floor), &test_car_config())
}

fn tick(car: &mut Elevator, n: usize) -> Vec<CarEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        car.update(TICK, SimTime::ZERO, &mut events);
    }
    events
}

fn rider(id: u64, from: u32, to: u32) -> Passenger {
    Passenger::new(PassengerId(id), FloorId(from), FloorId(to), 1, SimTime::ZERO)
}

fn scenario(residents: Vec<u32>, elevators: u32) -> Scenario {
    Scenario {
        name: "test".into(),
        residents,
        elevators,
        start_floor: FloorId::LOBBY,
        car: test_car_config(),
    }
}

// ── Motion state machine ──────────────────────────────────────────────────────

#[cfg(test)]
mod motion {
    use super::*;

    #[test]
    fn single_hop_trip_takes_start_plus_stop() {
        let mut car = car_at(0);
        car.move_towards(FloorId(1));
        assert_eq!(car.state(), MotionState::Accelerating);
        assert_eq!(car.direction(), Direction::Up);

        // 1 s acceleration; the braking point is immediate for a one-floor
        // hop, so the cruise phase is skipped entirely.
        tick(&mut car, 2);
        assert_eq!(car.state(), MotionState::Decelerating);

        // 1 s braking lands on the stop.
        tick(&mut car, 2);
        assert_eq!(car.state(), MotionState::Stopped);
        assert_eq!(car.floor(), FloorId(1));
        assert!(!car.has_stop(FloorId(1)));

        // 1 s door dwell, queue empty: park.
        let events = tick(&mut car, 2);
        assert_eq!(car.state(), MotionState::Idle);
        assert_eq!(car.direction(), Direction::None);
        assert!(matches!(events.as_slice(), [CarEvent::Idle(id)] if *id == ElevatorId(0)));
    }

    #[test]
    fn three_floor_trip_cruises_past_intermediate_floors() {
        let mut car = car_at(0);
        car.move_towards(FloorId(3));

        let mut seen = Vec::new();
        let mut ticks = 0;
        while car.state() != MotionState::Stopped {
            tick(&mut car, 1);
            ticks += 1;
            seen.push(car.state());
            assert!(ticks < 20, "trip never completed");
        }
        // start + 2 passages + stop = 4 s = 8 half-second ticks.
        assert_eq!(ticks, 8);
        assert_eq!(car.floor(), FloorId(3));
        assert!(seen.contains(&MotionState::Accelerating));
        assert!(seen.contains(&MotionState::Moving));
        assert!(seen.contains(&MotionState::Decelerating));
    }

    #[test]
    fn turning_takes_one_tick_and_reverses() {
        let mut car = car_at(2);
        car.move_towards(FloorId(0));
        // 1 s start + 1 s passage + 1 s stop = 6 ticks down to floor 0.
        tick(&mut car, 6);
        assert_eq!(car.state(), MotionState::Stopped);
        assert_eq!(car.floor(), FloorId(0));
        assert_eq!(car.direction(), Direction::Down);

        // A stop behind the commitment forces a reversal after the dwell.
        car.move_towards(FloorId(2));
        tick(&mut car, 2);
        assert_eq!(car.state(), MotionState::Turning);

        let events = tick(&mut car, 1);
        assert_eq!(car.state(), MotionState::Accelerating);
        assert_eq!(car.direction(), Direction::Up);
        assert!(matches!(events.as_slice(), [CarEvent::Turned(_)]));
    }

    #[test]
    fn stop_at_next_floor_lands_mid_route() {
        let mut car = car_at(0);
        car.move_towards(FloorId(3));
        tick(&mut car, 3); // cruising, still below floor 1
        assert_eq!(car.state(), MotionState::Moving);
        assert_eq!(car.floor(), FloorId(0));

        car.stop_at_next_floor();
        assert!(car.has_stop(FloorId(1)));

        let mut ticks = 0;
        while car.state() != MotionState::Stopped {
            tick(&mut car, 1);
            ticks += 1;
            assert!(ticks < 20, "car never stopped");
        }
        assert_eq!(car.floor(), FloorId(1));
        // The original destination is still committed.
        assert!(car.has_stop(FloorId(3)));

        // After the dwell the car continues upward on its own.
        tick(&mut car, 2);
        assert_eq!(car.state(), MotionState::Accelerating);
        assert_eq!(car.direction(), Direction::Up);
    }

    #[test]
    fn dispatch_to_own_floor_is_a_no_op() {
        let mut car = car_at(2);
        car.move_towards(FloorId(2));
        assert_eq!(car.state(), MotionState::Idle);
        assert_eq!(car.direction(), Direction::None);
        assert_eq!(car.stop_count(), 0);
    }

    #[test]
    fn moving_car_drops_targets_behind_it() {
        let mut car = car_at(1);
        car.move_towards(FloorId(3));
        tick(&mut car, 3); // cruising upward
        car.move_towards(FloorId(0));
        assert!(!car.has_stop(FloorId(0)));
        assert!(car.has_stop(FloorId(3)));
    }

    #[test]
    fn direction_is_none_exactly_when_idle() {
        let mut car = car_at(0);
        let mut p = rider(1, 0, 2);
        // Walk a full trip: dispatch, board, travel, exit, park.
        assert!(car.try_board(p, SimTime::ZERO).is_ok());
        car.commit_destination(PassengerId(1));
        for _ in 0..30 {
            tick(&mut car, 1);
            assert_eq!(
                car.direction() == Direction::None,
                car.state() == MotionState::Idle,
                "direction/state fell out of sync in {:?}",
                car.state(),
            );
        }
        assert_eq!(car.state(), MotionState::Idle);
        p = rider(2, 2, 0);
        assert!(car.can_pickup(&p));
    }
}

// ── Boarding ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod boarding {
    use super::*;

    #[test]
    fn refuses_beyond_capacity_and_returns_the_passenger() {
        let mut car = car_at(0);
        for id in 0..4 {
            assert!(car.try_board(rider(id, 0, 2), SimTime::ZERO).is_ok());
        }
        assert_eq!(car.load(), 4);
        let refused = car.try_board(rider(9, 0, 2), SimTime::ZERO);
        let p = refused.expect_err("a full car must refuse");
        assert_eq!(p.id(), PassengerId(9));
        assert!(p.boarded_at().is_none());
        assert_eq!(car.load(), 4);
    }

    #[test]
    fn refuses_opposite_hall_direction() {
        let mut car = car_at(2);
        assert!(car.try_board(rider(1, 2, 4), SimTime::ZERO).is_ok());
        assert_eq!(car.direction(), Direction::Up);
        let refused = car.try_board(rider(2, 2, 0), SimTime::ZERO);
        assert!(refused.is_err());
        assert_eq!(car.manifest().len(), 1);
    }

    #[test]
    fn idle_boarding_opens_a_door_window() {
        let mut car = car_at(0);
        assert!(car.try_board(rider(1, 0, 3), SimTime::ZERO).is_ok());
        assert_eq!(car.state(), MotionState::Stopped);
        car.commit_destination(PassengerId(1));
        assert!(car.has_stop(FloorId(3)));

        // Full door dwell, then pull away towards the committed stop.
        tick(&mut car, 2);
        assert_eq!(car.state(), MotionState::Accelerating);
        assert_eq!(car.direction(), Direction::Up);
    }

    #[test]
    fn commit_ignores_unknown_ids_and_own_floor() {
        let mut car = car_at(0);
        car.commit_destination(PassengerId(99));
        assert_eq!(car.stop_count(), 0);

        assert!(car.try_board(rider(1, 0, 2), SimTime::ZERO).is_ok());
        car.passenger_mut(PassengerId(1)).unwrap().reroute_to(FloorId(1));
        car.commit_destination(PassengerId(1));
        assert!(car.has_stop(FloorId(1)));
        assert!(!car.has_stop(FloorId(2)));
    }

    #[test]
    fn exit_event_hands_the_passenger_back() {
        let mut car = car_at(0);
        assert!(car.try_board(rider(7, 0, 2), SimTime::ZERO).is_ok());
        car.commit_destination(PassengerId(7));

        let mut events = Vec::new();
        for _ in 0..30 {
            car.update(TICK, SimTime::ZERO, &mut events);
        }
        let exited = events
            .iter()
            .find_map(|e| match e {
                CarEvent::Exited { passenger, .. } => Some(passenger),
                _ => None,
            })
            .expect("passenger should have exited");
        assert_eq!(exited.id(), PassengerId(7));
        assert_eq!(exited.destination(), FloorId(2));
        assert!(car.manifest().is_empty());
    }

    #[test]
    fn random_boarding_burst_respects_capacity() {
        let mut car = car_at(0);
        let mut boarded = 0;
        for id in 0..20 {
            let to = 1 + (id as u32 * 7) % 5;
            if car.try_board(rider(id, 0, to), SimTime::ZERO).is_ok() {
                boarded += 1;
            }
            assert!(car.load() <= car.capacity());
        }
        // Everyone heads up and weighs 1, so exactly the capacity boards.
        assert_eq!(boarded, car.capacity());
    }
}

// ── Energy accounting ─────────────────────────────────────────────────────────

#[cfg(test)]
mod energy {
    use super::*;

    #[test]
    fn parked_car_draws_the_idle_rate() {
        let mut car = car_at(0);
        tick(&mut car, 10); // 5 s
        assert!((car.energy().total() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn adjacent_ramp_spells_charge_once() {
        let mut car = car_at(0);
        car.move_towards(FloorId(1));
        // One-floor hop: acceleration flows straight into braking, so the
        // ramp charge lands once, plus two dwell ticks at the idle rate.
        tick(&mut car, 6);
        let expected = 0.5 * (1.0 + 0.01) * 1.0 + 2.0 * 0.5 * 0.01;
        assert!((car.energy().total() - expected).abs() < 1e-9);
    }

    #[test]
    fn cruise_separates_ramp_charges() {
        let mut car = car_at(0);
        car.move_towards(FloorId(3));
        tick(&mut car, 8); // through to the stop
        assert_eq!(car.state(), MotionState::Stopped);
        // Two ramp charges around 2 s of cruising.
        let expected = 2.0 * 0.5 * (1.0 + 0.01) * 1.0 + 2.0 * 1.0;
        assert!((car.energy().total() - expected).abs() < 1e-9);
    }
}

// ── Building-level generation and boarding ────────────────────────────────────

#[cfg(test)]
mod generation {
    use super::*;

    fn building(residents: Vec<u32>, cars: u32) -> Building {
        Building::new(&scenario(residents, cars), Box::new(IntervalProfile::uniform(0.35)), 42)
            .unwrap()
    }

    /// Drive `hours` of simulated time and count hall arrivals.
    fn run_arrivals(building: &mut Building, hours: u64, open: bool) -> usize {
        let mut clock = SimClock::new(1.0);
        let mut schedule = ArrivalSchedule::new();
        let mut ids = IdAllocator::new();
        let mut arrived = 0;
        for _ in 0..hours * 3600 {
            let events = building.update_floors(
                clock.now(),
                clock.tick_duration(),
                open,
                false,
                &mut schedule,
                &mut ids,
            );
            arrived += events
                .iter()
                .filter(|e| matches!(e, FloorEvent::Arrived(_)))
                .count();
            // No cars move; drain queues so waits do not matter here.
            clock.step();
        }
        arrived
    }

    #[test]
    fn arrival_counts_track_the_profile_rate() {
        // 120 residents upstairs, uniform profile at 35 %/hour: the bank
        // expects 0.35 * 120 = 42 arrivals per hour building-wide.
        let mut b = building(vec![0, 120], 1);
        let arrived = run_arrivals(&mut b, 2, true);
        assert!(
            (42..=168).contains(&arrived),
            "got {arrived} arrivals over two hours, expected around 84",
        );
    }

    #[test]
    fn closed_horizon_generates_nothing() {
        let mut b = building(vec![0, 120], 1);
        let arrived = run_arrivals(&mut b, 1, false);
        assert_eq!(arrived, 0);
    }

    #[test]
    fn replay_entries_inject_in_timestamp_order() {
        let mut b = building(vec![10, 10, 10], 1);
        let mut schedule = ArrivalSchedule::from_entries(vec![
            ScheduledArrival {
                at: SimTime(5 * 1_000_000_000),
                floor: FloorId(1),
                destination: FloorId(0),
            },
            ScheduledArrival {
                at: SimTime(3 * 1_000_000_000),
                floor: FloorId(0),
                destination: FloorId(1),
            },
        ]);
        let mut clock = SimClock::new(1.0);
        let mut ids = IdAllocator::new();
        let mut order = Vec::new();
        for _ in 0..10 {
            let events = b.update_floors(
                clock.now(),
                clock.tick_duration(),
                true,
                true,
                &mut schedule,
                &mut ids,
            );
            for e in events {
                if let FloorEvent::Arrived(call) = e {
                    order.push((clock.now().as_secs_f64() as u64, call.floor));
                }
            }
            clock.step();
        }
        assert_eq!(order, vec![(3, FloorId(0)), (5, FloorId(1))]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn schedule_is_consumed_head_first_one_per_floor_per_tick() {
        // Two due entries for the same floor: the second waits a tick.
        let mut b = building(vec![10, 10], 1);
        let mut schedule = ArrivalSchedule::from_entries(vec![
            ScheduledArrival { at: SimTime::ZERO, floor: FloorId(1), destination: FloorId(0) },
            ScheduledArrival { at: SimTime::ZERO, floor: FloorId(1), destination: FloorId(0) },
        ]);
        let mut clock = SimClock::new(1.0);
        let mut ids = IdAllocator::new();

        b.update_floors(clock.now(), clock.tick_duration(), true, true, &mut schedule, &mut ids);
        assert_eq!(b.floor(FloorId(1)).waiting_count(), 1);
        assert_eq!(schedule.len(), 1);
        clock.step();

        b.update_floors(clock.now(), clock.tick_duration(), true, true, &mut schedule, &mut ids);
        assert_eq!(b.floor(FloorId(1)).waiting_count(), 2);
        assert!(schedule.is_empty());
    }

    #[test]
    fn direct_boarding_runs_before_generation() {
        let mut b = building(vec![10, 10, 10], 1);
        let mut schedule = ArrivalSchedule::new();
        schedule.inject_front(ScheduledArrival {
            at: SimTime::ZERO,
            floor: FloorId(0),
            destination: FloorId(2),
        });
        let mut clock = SimClock::new(1.0);
        let mut ids = IdAllocator::new();

        // Tick 1: the arrival lands after the boarding pass, so the idle car
        // in the lobby does not pick it up yet.
        let events =
            b.update_floors(clock.now(), clock.tick_duration(), true, true, &mut schedule, &mut ids);
        assert!(matches!(events.as_slice(), [FloorEvent::Arrived(_)]));
        assert_eq!(b.floor(FloorId(0)).waiting_count(), 1);
        assert!(b.elevator(ElevatorId(0)).manifest().is_empty());
        clock.step();

        // Tick 2: the boarding pass finds the waiting passenger.
        let events =
            b.update_floors(clock.now(), clock.tick_duration(), true, true, &mut schedule, &mut ids);
        assert!(matches!(events.as_slice(), [FloorEvent::Boarded { .. }]));
        assert_eq!(b.floor(FloorId(0)).waiting_count(), 0);
        assert_eq!(b.elevator(ElevatorId(0)).manifest().len(), 1);
    }
}

// ── Construction and reset ────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    fn profile() -> Box<IntervalProfile> {
        Box::new(IntervalProfile::uniform(0.1))
    }

    #[test]
    fn rejects_single_floor() {
        let err = Building::new(&scenario(vec![10], 1), profile(), 0).unwrap_err();
        assert!(matches!(err, BuildingError::TooFewFloors(1)));
    }

    #[test]
    fn rejects_empty_bank() {
        let err = Building::new(&scenario(vec![10, 10], 0), profile(), 0).unwrap_err();
        assert!(matches!(err, BuildingError::NoElevators));
    }

    #[test]
    fn rejects_start_floor_outside_building() {
        let mut s = scenario(vec![10, 10], 1);
        s.start_floor = FloorId(5);
        let err = Building::new(&s, profile(), 0).unwrap_err();
        assert!(matches!(err, BuildingError::StartFloorOutOfRange { .. }));
    }

    #[test]
    fn reset_restores_a_clean_building() {
        let mut b = Building::new(&scenario(vec![10, 10, 10], 2), profile(), 7).unwrap();
        let mut schedule = ArrivalSchedule::new();
        schedule.inject_front(ScheduledArrival {
            at: SimTime::ZERO,
            floor: FloorId(1),
            destination: FloorId(0),
        });
        let mut ids = IdAllocator::new();
        b.update_floors(SimTime::ZERO, TICK, true, true, &mut schedule, &mut ids);
        b.elevator_mut(ElevatorId(1)).move_towards(FloorId(2));
        b.update_elevators(TICK, SimTime::ZERO);
        assert!(!b.floors_empty());

        b.reset(99);
        assert!(b.floors_empty());
        assert!(b.manifests_empty());
        for car in b.elevators() {
            assert_eq!(car.state(), MotionState::Idle);
            assert_eq!(car.floor(), FloorId::LOBBY);
            assert_eq!(car.energy().total(), 0.0);
        }
    }
}
