//! The per-car motion state machine.
//!
//! A car is a timed automaton over six states:
//!
//! | State          | Meaning                                  | Leaves after            |
//! |----------------|------------------------------------------|-------------------------|
//! | `Idle`         | parked, no commitment, direction `None`  | an external command     |
//! | `Accelerating` | pulling away from a standstill           | `start_time`            |
//! | `Moving`       | cruising, one floor per `floor_time`     | braking point reached   |
//! | `Decelerating` | braking into a committed stop            | `stop_time`             |
//! | `Stopped`      | doors open at a stop                     | `door_time`             |
//! | `Turning`      | reversing the committed direction        | one tick                |
//!
//! Phase timers carry their overshoot into the next phase, so trip times are
//! exact regardless of tick length: a trip over `n` floors takes
//! `start_time + (n - 1) * floor_time + stop_time`.  The braking distance is
//! one floor; a stop inserted for the floor the car is about to reach is
//! honoured, anything closer is already too late and waits for a later pass.
//!
//! Boarding is split in two: [`Elevator::try_board`] admits the passenger
//! into the manifest (capacity and direction checked, refusals hand the
//! passenger back), and [`Elevator::commit_destination`] later inserts the
//! destination stop.  The gap lets the dispatcher re-route a passenger after
//! boarding but before the car commits to the original destination.

use std::collections::BTreeSet;
use std::fmt;

use lift_core::{
    Direction, ElevatorConfig, ElevatorId, FloorId, Passenger, PassengerId, SimClock, SimTime,
};
use log::{debug, trace};

use crate::events::CarEvent;

// ── Motion states ───────────────────────────────────────────────────────────

/// Where a car is in its motion cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionState {
    /// Parked with an empty stop queue.  The only state with direction
    /// `None`, and the only one a dispatch command can pull a car out of.
    Idle,
    /// Spinning up from a standstill.
    Accelerating,
    /// At cruise speed, advancing one floor per passage time.
    Moving,
    /// Braking into the next floor, which is a committed stop.
    Decelerating,
    /// Dwelling at a stop with the doors open.
    Stopped,
    /// Reversing to serve stops behind the committed direction.  Lasts
    /// exactly one tick.
    Turning,
}

impl MotionState {
    pub fn as_str(self) -> &'static str {
        match self {
            MotionState::Idle => "idle",
            MotionState::Accelerating => "accelerating",
            MotionState::Moving => "moving",
            MotionState::Decelerating => "decelerating",
            MotionState::Stopped => "stopped",
            MotionState::Turning => "turning",
        }
    }
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Phase timing ────────────────────────────────────────────────────────────

/// Phase durations in nanoseconds, precomputed from an [`ElevatorConfig`].
#[derive(Debug, Clone, Copy)]
struct PhaseTiming {
    start_ns: u64,
    floor_ns: u64,
    stop_ns:  u64,
    door_ns:  u64,
}

impl PhaseTiming {
    fn from_config(cfg: &ElevatorConfig) -> Self {
        PhaseTiming {
            start_ns: SimClock::secs_to_duration(cfg.start_time_secs),
            floor_ns: SimClock::secs_to_duration(cfg.floor_time_secs),
            stop_ns:  SimClock::secs_to_duration(cfg.stop_time_secs),
            door_ns:  SimClock::secs_to_duration(cfg.door_time_secs),
        }
    }
}

// ── Energy accounting ───────────────────────────────────────────────────────

/// Energy drawn while cruising, in units per simulated second.
const MOVE_RATE: f64 = 1.0;
/// Energy drawn while parked, dwelling, or turning, in units per second.
const IDLE_RATE: f64 = 0.01;

/// Accumulates a car's energy use across the run.
///
/// Cruising and standing accrue per tick at their rates.  A ramp spell
/// (accelerating or braking) is charged once, up front, at the average of the
/// two rates over the configured spin-up time; the latch clears as soon as
/// the car is seen in a non-ramp state.  Back-to-back ramp spells with no
/// cruise tick between them therefore collapse into a single charge.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyMeter {
    total:        f64,
    ramp_charged: bool,
}

impl EnergyMeter {
    /// Charge one tick spent in `state`.  `ramp_secs` is the spin-up time
    /// used to price a ramp spell.
    fn record(&mut self, state: MotionState, dt_ns: u64, ramp_secs: f64) {
        let secs = SimClock::duration_to_secs(dt_ns);
        match state {
            MotionState::Moving => {
                self.total += MOVE_RATE * secs;
                self.ramp_charged = false;
            }
            MotionState::Idle | MotionState::Stopped | MotionState::Turning => {
                self.total += IDLE_RATE * secs;
                self.ramp_charged = false;
            }
            MotionState::Accelerating | MotionState::Decelerating => {
                if !self.ramp_charged {
                    self.total += 0.5 * (MOVE_RATE + IDLE_RATE) * ramp_secs;
                    self.ramp_charged = true;
                }
            }
        }
    }

    /// Total units drawn so far.
    pub fn total(&self) -> f64 {
        self.total
    }

    fn reset(&mut self) {
        self.total = 0.0;
        self.ramp_charged = false;
    }
}

// ── The car ─────────────────────────────────────────────────────────────────

/// One elevator car.
///
/// The car tracks its own motion and passengers; it never looks at hall
/// queues or other cars.  Commands arrive from the dispatch layer
/// ([`Elevator::move_towards`], [`Elevator::stop_at_next_floor`]) and from
/// floors handing passengers over ([`Elevator::try_board`]).
#[derive(Debug)]
pub struct Elevator {
    id:        ElevatorId,
    floor:     FloorId,
    direction: Direction,
    state:     MotionState,
    /// Committed stops.  Ordered so directional scans are range queries.
    stops:     BTreeSet<FloorId>,
    manifest:  Vec<Passenger>,
    capacity:  u32,
    timing:    PhaseTiming,
    ramp_secs: f64,
    /// Nanoseconds spent in the current phase, overshoot carried over.
    elapsed:   u64,
    energy:    EnergyMeter,
}

impl Elevator {
    pub fn new(id: ElevatorId, start_floor: FloorId, cfg: &ElevatorConfig) -> Self {
        Elevator {
            id,
            floor: start_floor,
            direction: Direction::None,
            state: MotionState::Idle,
            stops: BTreeSet::new(),
            manifest: Vec::new(),
            capacity: cfg.capacity,
            timing: PhaseTiming::from_config(cfg),
            ramp_secs: cfg.start_time_secs,
            elapsed: 0,
            energy: EnergyMeter::default(),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn id(&self) -> ElevatorId {
        self.id
    }

    pub fn floor(&self) -> FloorId {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Passengers currently riding.
    pub fn manifest(&self) -> &[Passenger] {
        &self.manifest
    }

    /// Combined weight of the manifest.
    pub fn load(&self) -> u32 {
        self.manifest.iter().map(Passenger::weight).sum()
    }

    /// Number of committed stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Whether `floor` is a committed stop.
    pub fn has_stop(&self, floor: FloorId) -> bool {
        self.stops.contains(&floor)
    }

    pub fn energy(&self) -> &EnergyMeter {
        &self.energy
    }

    /// The floor one step ahead in the committed direction, or `None` when
    /// parked or already at the travel limit.
    pub fn next_floor(&self) -> Option<FloorId> {
        match self.direction {
            Direction::Up => Some(FloorId(self.floor.0 + 1)),
            Direction::Down if self.floor.0 > 0 => Some(FloorId(self.floor.0 - 1)),
            _ => None,
        }
    }

    /// Whether the doors are open for boarding.
    pub fn can_board(&self) -> bool {
        matches!(self.state, MotionState::Stopped | MotionState::Idle)
    }

    /// Whether a rider of `weight` heading `direction` would fit: spare
    /// capacity, and a hall direction compatible with the car's commitment.
    pub fn can_accept(&self, direction: Direction, weight: u32) -> bool {
        self.load() + weight <= self.capacity
            && (self.direction.is_none() || direction == self.direction)
    }

    /// [`Elevator::can_accept`] for a concrete passenger.
    pub fn can_pickup(&self, passenger: &Passenger) -> bool {
        self.can_accept(passenger.direction(), passenger.weight())
    }

    pub fn passenger(&self, id: PassengerId) -> Option<&Passenger> {
        self.manifest.iter().find(|p| p.id() == id)
    }

    pub fn passenger_mut(&mut self, id: PassengerId) -> Option<&mut Passenger> {
        self.manifest.iter_mut().find(|p| p.id() == id)
    }

    // ── Boarding ───────────────────────────────────────────────────────────

    /// Admit a waiting passenger into the manifest.
    ///
    /// Re-checks the door and fit conditions and hands the passenger back
    /// untouched on refusal.  On success the boarding time is stamped, an
    /// idle car adopts the passenger's hall direction and opens a fresh door
    /// window, and a dwelling car keeps its current window.  The destination
    /// stop is not committed here; see [`Elevator::commit_destination`].
    pub fn try_board(&mut self, passenger: Passenger, now: SimTime) -> Result<(), Passenger> {
        if !self.can_board() || !self.can_pickup(&passenger) {
            return Err(passenger);
        }
        let mut passenger = passenger;
        if self.direction.is_none() {
            self.direction = passenger.direction();
        }
        if self.state == MotionState::Idle {
            self.state = MotionState::Stopped;
            self.elapsed = 0;
        }
        passenger.record_boarding(now);
        debug!(
            "[{now}] car {}: passenger {} boarded at {} heading {}",
            self.id,
            passenger.id(),
            self.floor,
            passenger.direction(),
        );
        self.manifest.push(passenger);
        Ok(())
    }

    /// Commit the destination stop of an already boarded passenger.  Called
    /// by the dispatcher after its re-routing hook has run.  Unknown ids and
    /// destinations equal to the current floor are ignored.
    pub fn commit_destination(&mut self, id: PassengerId) {
        let Some(destination) = self.passenger(id).map(Passenger::destination) else {
            trace!("car {}: no passenger {} to commit", self.id, id);
            return;
        };
        if destination != self.floor {
            self.stops.insert(destination);
        }
    }

    // ── Dispatch commands ──────────────────────────────────────────────────

    /// Send the car towards `target`.
    ///
    /// An idle car commits to the direction of `target`, inserts the stop and
    /// pulls away; targeting its own floor is a no-op.  A dwelling car takes
    /// the stop unconditionally.  A car in motion takes the stop only if it
    /// lies ahead in the committed direction; anything else is silently
    /// dropped, and the dispatcher is expected to try again later.
    pub fn move_towards(&mut self, target: FloorId) {
        match self.state {
            MotionState::Idle => {
                if target == self.floor {
                    return;
                }
                self.direction = Direction::between(self.floor, target);
                self.stops.insert(target);
                self.state = MotionState::Accelerating;
                self.elapsed = 0;
                trace!("car {}: dispatched from {} to {}", self.id, self.floor, target);
            }
            MotionState::Stopped => {
                if target != self.floor {
                    self.stops.insert(target);
                }
            }
            MotionState::Accelerating | MotionState::Moving | MotionState::Decelerating => {
                let ahead = match self.direction {
                    Direction::Up => target > self.floor,
                    Direction::Down => target < self.floor,
                    Direction::None => false,
                };
                if ahead {
                    self.stops.insert(target);
                }
            }
            MotionState::Turning => {}
        }
    }

    /// Commit a stop at the floor the car is heading into.  A no-op unless
    /// the car is accelerating or cruising; braking distance is one floor, so
    /// the request still lands in time.
    pub fn stop_at_next_floor(&mut self) {
        if matches!(self.state, MotionState::Accelerating | MotionState::Moving) {
            if let Some(next) = self.next_floor() {
                self.stops.insert(next);
                trace!("car {}: will stop at {}", self.id, next);
            }
        }
    }

    // ── Tick update ────────────────────────────────────────────────────────

    /// Advance the car by one tick of `dt_ns` nanoseconds, appending any
    /// exit, idle, or turn events to `events`.
    pub fn update(&mut self, dt_ns: u64, now: SimTime, events: &mut Vec<CarEvent>) {
        self.energy.record(self.state, dt_ns, self.ramp_secs);
        match self.state {
            MotionState::Idle => {}
            MotionState::Accelerating => {
                self.elapsed += dt_ns;
                if self.elapsed >= self.timing.start_ns {
                    self.elapsed -= self.timing.start_ns;
                    self.state = MotionState::Moving;
                    self.check_braking();
                }
            }
            MotionState::Moving => {
                self.check_braking();
                self.elapsed += dt_ns;
                while self.state == MotionState::Moving && self.elapsed >= self.timing.floor_ns {
                    self.elapsed -= self.timing.floor_ns;
                    self.pass_floor();
                    self.check_braking();
                }
            }
            MotionState::Decelerating => {
                self.elapsed += dt_ns;
                if self.elapsed >= self.timing.stop_ns {
                    self.arrive(now, events);
                }
            }
            MotionState::Stopped => {
                self.elapsed += dt_ns;
                if self.elapsed >= self.timing.door_ns {
                    self.depart(events);
                }
            }
            MotionState::Turning => {
                self.direction = self.direction.opposite();
                self.state = MotionState::Accelerating;
                self.elapsed = 0;
                events.push(CarEvent::Turned(self.id));
            }
        }
    }

    /// Brake if the next floor is a committed stop.  The phase timer carries
    /// over, so braking consumes exactly the configured stop time.
    fn check_braking(&mut self) {
        if let Some(next) = self.next_floor() {
            if self.stops.contains(&next) {
                self.state = MotionState::Decelerating;
            }
        }
    }

    fn pass_floor(&mut self) {
        if let Some(next) = self.next_floor() {
            self.floor = next;
        } else {
            debug_assert!(false, "cruising car has no next floor");
        }
    }

    /// Finish braking: land on the stop, open the doors, let everyone whose
    /// destination this is step out.
    fn arrive(&mut self, now: SimTime, events: &mut Vec<CarEvent>) {
        if let Some(next) = self.next_floor() {
            self.floor = next;
        }
        self.stops.remove(&self.floor);
        self.state = MotionState::Stopped;
        self.elapsed = 0;
        let mut i = 0;
        while i < self.manifest.len() {
            if self.manifest[i].destination() == self.floor {
                let passenger = self.manifest.swap_remove(i);
                debug!(
                    "[{now}] car {}: passenger {} exited at {}",
                    self.id,
                    passenger.id(),
                    self.floor,
                );
                events.push(CarEvent::Exited { elevator: self.id, passenger });
            } else {
                i += 1;
            }
        }
    }

    /// Door window over: continue ahead, reverse for stops behind, or park.
    fn depart(&mut self, events: &mut Vec<CarEvent>) {
        if self.stops.is_empty() {
            self.direction = Direction::None;
            self.state = MotionState::Idle;
            self.elapsed = 0;
            events.push(CarEvent::Idle(self.id));
            return;
        }
        debug_assert!(!self.direction.is_none(), "dwelling car lost its direction");
        let ahead = match self.direction {
            Direction::Up => self.stops.range(FloorId(self.floor.0 + 1)..).next(),
            Direction::Down => self.stops.range(..self.floor).next_back(),
            Direction::None => None,
        };
        self.elapsed = 0;
        if ahead.is_some() {
            self.state = MotionState::Accelerating;
        } else {
            // Everything left is behind the commitment.
            self.state = MotionState::Turning;
        }
    }

    /// Park the car back at `start_floor` with a clean slate.
    pub(crate) fn reset(&mut self, start_floor: FloorId) {
        self.floor = start_floor;
        self.direction = Direction::None;
        self.state = MotionState::Idle;
        self.stops.clear();
        self.manifest.clear();
        self.elapsed = 0;
        self.energy.reset();
    }
}
