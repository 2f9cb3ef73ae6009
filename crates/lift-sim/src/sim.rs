//! The `Simulator` struct and its tick loop.

use lift_building::{Building, CarEvent, FloorEvent};
use lift_core::{IdAllocator, SimClock, SimSettings, SimTime};
use lift_dispatch::ControlSystem;
use lift_traffic::{ArrivalSchedule, ScheduledArrival};
use log::info;

use crate::SimObserver;

/// The main simulation runner.
///
/// `Simulator` holds all run state and drives the fixed tick pipeline:
///
/// 1. **Floors** ([`Building::update_floors`]): waiting passengers board
///    cars dwelling at their floor, then new arrivals appear — due schedule
///    entries first, then (while the horizon is open and outside replay
///    mode) one stochastic sample per floor.
/// 2. **Events out**: each floor event reaches the observer and the control
///    system in order, so boardings commit their destination stops before
///    any car moves again.
/// 3. **Cars** ([`Building::update_elevators`]): every motion state machine
///    advances by one tick; exits, idle and turn events fan out the same
///    way as floor events.
/// 4. **Policy** ([`ControlSystem::update`]): fresh dispatch layered on top
///    of what the cars did with last tick's commands.
/// 5. **Observer + clock**: `on_tick`, then the clock steps.
///
/// Generation stops once simulated time reaches the horizon; the run itself
/// ends when additionally every floor queue and every manifest has drained
/// and no planned arrival is due.  Transfer continuations injected by zoned
/// policies land in the schedule, so they hold the run open until the last
/// relayed passenger is delivered.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulator {
    /// Scenario name, carried through to reports.
    pub name: String,

    /// Settings the run was built with; `seed` tracks the live seed across
    /// [`reset`][Simulator::reset] calls.
    pub settings: SimSettings,

    /// Virtual clock, stepped once per tick.
    pub clock: SimClock,

    /// Floors, cars, and the traffic profile.
    pub building: Building,

    /// Hall-call queue plus the active scheduling policy.
    pub control: ControlSystem,

    /// Pending planned arrivals: the replay input plus any transfer
    /// continuations injected mid-run.
    pub schedule: ArrivalSchedule,

    /// Passenger id source, shared by every floor.
    pub ids: IdAllocator,

    /// Pristine copy of the planned arrivals, restored by `reset`.
    plan: Vec<ScheduledArrival>,

    /// Instant after which no new traffic is sampled.
    horizon: SimTime,

    /// Replay runs take arrivals from the schedule only.
    replay: bool,

    done: bool,
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("name", &self.name)
            .field("settings", &self.settings)
            .field("clock", &self.clock)
            .field("horizon", &self.horizon)
            .field("replay", &self.replay)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick until the termination condition holds.
    ///
    /// Calls observer hooks throughout; use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.advance(observer) {}
    }

    /// Process exactly one tick.  Returns `false` once the run has
    /// terminated (and keeps returning `false` until [`reset`]).
    ///
    /// [`reset`]: Simulator::reset
    pub fn advance<O: SimObserver>(&mut self, observer: &mut O) -> bool {
        if self.done {
            return false;
        }
        self.process_tick(observer);
        if self.finished() {
            self.done = true;
            info!("{} run \"{}\" finished", self.clock, self.name);
            observer.on_done(self.clock.now(), &self.building);
        }
        !self.done
    }

    /// Whether the run has terminated.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Instant after which no new traffic is sampled.
    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    /// Rewind everything for a fresh run of the same scenario.
    ///
    /// Floors are re-seeded from `seed`, cars re-park at the start floor,
    /// the planned arrivals are restored in full, and the policy's
    /// `activated` hook runs before the bank is re-bootstrapped.
    pub fn reset(&mut self, seed: u64) {
        self.settings.seed = seed;
        self.clock.reset();
        self.building.reset(seed);
        self.ids = IdAllocator::new();
        self.schedule = ArrivalSchedule::from_entries(self.plan.clone());
        self.done = false;
        self.control.reset(&self.clock, &mut self.building, &mut self.schedule);
        self.control.bootstrap(&self.clock, &mut self.building, &mut self.schedule);
        info!("simulation \"{}\" reset with seed {seed}", self.name);
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.now();
        let dt = self.clock.tick_duration();
        let open = now < self.horizon;

        // ── Phase 1+2: floors, then their events in order ──────────────────
        let floor_events =
            self.building
                .update_floors(now, dt, open, self.replay, &mut self.schedule, &mut self.ids);
        for event in &floor_events {
            if let FloorEvent::Arrived(call) = event {
                observer.on_passenger_generated(call);
            }
            self.control
                .on_floor_event(event, &self.clock, &mut self.building, &mut self.schedule);
        }

        // ── Phase 3: cars, then their events ──────────────────────────────
        let car_events = self.building.update_elevators(dt, now);
        for event in &car_events {
            if let CarEvent::Exited { elevator, passenger } = event {
                observer.on_passenger_exited(now, *elevator, passenger);
            }
            self.control
                .on_car_event(event, &self.clock, &mut self.building, &mut self.schedule);
        }

        // ── Phase 4: policy sees this tick's hall queue ────────────────────
        self.control.update(&self.clock, &mut self.building, &mut self.schedule);

        // ── Phase 5: observer, clock ───────────────────────────────────────
        observer.on_tick(now, &self.building);
        self.clock.step();
    }

    /// The horizon has passed, the building has drained, and nothing in the
    /// schedule is due.  Entries planned beyond the current instant (stale
    /// replay rows) do not hold the run open; a transfer continuation does,
    /// because it is due the moment it is injected.
    fn finished(&self) -> bool {
        self.clock.now() >= self.horizon
            && self.building.floors_empty()
            && self.building.manifests_empty()
            && self.schedule.peek().is_none_or(|next| next.at > self.clock.now())
    }
}

// ── Construction internals ───────────────────────────────────────────────────

impl Simulator {
    pub(crate) fn assemble(
        name: String,
        settings: SimSettings,
        building: Building,
        control: ControlSystem,
        plan: Vec<ScheduledArrival>,
        replay: bool,
    ) -> Self {
        let clock = SimClock::new(settings.tick_secs);
        let horizon = SimTime(SimClock::secs_to_duration(settings.horizon_secs));
        let schedule = ArrivalSchedule::from_entries(plan.clone());
        let mut sim = Simulator {
            name,
            settings,
            clock,
            building,
            control,
            schedule,
            ids: IdAllocator::new(),
            plan,
            horizon,
            replay,
            done: false,
        };
        // Split borrow: the control system dispatches into the building.
        let Simulator { control, clock, building, schedule, .. } = &mut sim;
        control.bootstrap(clock, building, schedule);
        sim
    }
}
