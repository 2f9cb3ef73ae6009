//! A floor: hall queue, arrival sampler, and direct boarding.
//!
//! Each floor owns its RNG, so the arrival streams of different floors never
//! interact and a run replays exactly from the seed.  Stochastic arrivals
//! follow a Poisson process whose rate and destination mix are refreshed once
//! per traffic interval; scheduled arrivals (replay files and re-injected
//! continuation trips) bypass the sampler entirely.

use std::collections::VecDeque;

use lift_core::{FloorId, FloorRng, HallCall, IdAllocator, Passenger, SimTime, NANOS_PER_MINUTE};
use lift_traffic::{exponential_gap, DestinationSampler, ScheduledArrival, TrafficProfile};
use log::debug;

use crate::elevator::Elevator;
use crate::events::FloorEvent;

/// One floor of the building.
#[derive(Debug)]
pub struct Floor {
    id:        FloorId,
    residents: u32,
    waiting:   VecDeque<Passenger>,
    rng:       FloorRng,
    /// Weighted destination mix for the current traffic interval.
    sampler:   DestinationSampler,
    /// When the current interval's parameters were drawn, if ever.
    interval_started: Option<SimTime>,
    /// Arrival rate for the current interval, in passengers per minute.
    rate_per_minute:  f64,
    /// Nanoseconds until the next stochastic arrival; `None` when the rate
    /// is zero.
    next_arrival_in:  Option<u64>,
}

impl Floor {
    pub fn new(id: FloorId, residents: u32, run_seed: u64) -> Self {
        Floor {
            id,
            residents,
            waiting: VecDeque::new(),
            rng: FloorRng::new(run_seed, id),
            sampler: DestinationSampler::default(),
            interval_started: None,
            rate_per_minute: 0.0,
            next_arrival_in: None,
        }
    }

    pub fn id(&self) -> FloorId {
        self.id
    }

    pub fn residents(&self) -> u32 {
        self.residents
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    pub fn has_waiting(&self) -> bool {
        !self.waiting.is_empty()
    }

    /// Passengers still in the hall queue, oldest first.
    pub fn waiting(&self) -> impl Iterator<Item = &Passenger> + '_ {
        self.waiting.iter()
    }

    // ── Direct boarding ─────────────────────────────────────────────────────

    /// Walk the hall queue and board anyone a dwelling car already at this
    /// floor will take.  Runs before arrival generation, so a passenger never
    /// boards in the tick it appears.  Refused passengers keep their place in
    /// the queue.
    pub(crate) fn board_waiting(
        &mut self,
        cars: &mut [Elevator],
        now: SimTime,
        events: &mut Vec<FloorEvent>,
    ) {
        let mut i = 0;
        'queue: while i < self.waiting.len() {
            for car in cars.iter_mut() {
                if car.floor() != self.id || !car.can_board() {
                    continue;
                }
                if !car.can_pickup(&self.waiting[i]) {
                    continue;
                }
                let Some(passenger) = self.waiting.remove(i) else {
                    break 'queue;
                };
                let id = passenger.id();
                match car.try_board(passenger, now) {
                    Ok(()) => {
                        events.push(FloorEvent::Boarded { elevator: car.id(), passenger: id });
                        continue 'queue;
                    }
                    Err(passenger) => {
                        // Races with a same-tick manifest change; put the
                        // passenger back where they stood.
                        self.waiting.insert(i, passenger);
                    }
                }
            }
            i += 1;
        }
    }

    // ── Arrival generation ──────────────────────────────────────────────────

    /// Run the sampling half of arrival generation for one tick and return
    /// the destination of a new arrival, if one fires.
    ///
    /// Touches only this floor's own state, which is what makes the phase
    /// safe to fan out across floors.  `skip` suppresses the countdown for a
    /// tick, used when a scheduled arrival already landed here.
    pub(crate) fn sample_arrival(
        &mut self,
        profile: &dyn TrafficProfile,
        residents: &[u32],
        now: SimTime,
        dt_ns: u64,
        skip: bool,
    ) -> Option<FloorId> {
        self.maintain_interval(profile, residents, now);
        if skip {
            return None;
        }
        match self.next_arrival_in.as_mut() {
            None => return None,
            Some(left) if *left > dt_ns => {
                *left -= dt_ns;
                return None;
            }
            Some(_) => {}
        }
        let destination = self.sampler.sample(&mut self.rng);
        self.next_arrival_in = exponential_gap(&mut self.rng, self.rate_per_minute);
        destination
    }

    /// Refresh the sampler, rate, and arrival countdown at interval
    /// boundaries.  The first call primes them; the countdown drawn here is
    /// what defers the very first arrival past time zero.
    fn maintain_interval(&mut self, profile: &dyn TrafficProfile, residents: &[u32], now: SimTime) {
        let due = match self.interval_started {
            None => true,
            Some(started) => now.since(started) >= profile.interval_length(),
        };
        if !due {
            return;
        }
        self.interval_started = Some(now);
        let from = self.id;
        self.sampler = DestinationSampler::new(
            (0..residents.len() as u32)
                .map(FloorId)
                .filter(|&to| to != from)
                .map(|to| (to, profile.destination_weight(residents, from, to, now))),
        );
        let interval_minutes = profile.interval_length() as f64 / NANOS_PER_MINUTE as f64;
        let average = profile.average_arrivals(residents, self.id, now);
        self.rate_per_minute = if interval_minutes > 0.0 { average / interval_minutes } else { 0.0 };
        self.next_arrival_in = exponential_gap(&mut self.rng, self.rate_per_minute);
    }

    /// Queue a freshly sampled arrival heading to `destination`.
    pub(crate) fn admit_sampled(
        &mut self,
        destination: FloorId,
        now: SimTime,
        ids: &mut IdAllocator,
        events: &mut Vec<FloorEvent>,
    ) {
        let passenger = Passenger::new(ids.next(), self.id, destination, 1, now);
        debug!(
            "[{now}] floor {}: passenger {} arrived heading to {}",
            self.id,
            passenger.id(),
            destination,
        );
        events.push(FloorEvent::Arrived(HallCall::of(&passenger)));
        self.waiting.push_back(passenger);
    }

    /// Queue a scheduled arrival.  The passenger keeps the schedule's arrival
    /// time, so waits accrued while the entry sat behind the schedule head
    /// still count.
    pub(crate) fn inject(
        &mut self,
        entry: ScheduledArrival,
        now: SimTime,
        ids: &mut IdAllocator,
        events: &mut Vec<FloorEvent>,
    ) {
        let passenger = Passenger::new(ids.next(), entry.floor, entry.destination, 1, entry.at);
        debug!(
            "[{now}] floor {}: scheduled passenger {} arrived heading to {}",
            self.id,
            passenger.id(),
            entry.destination,
        );
        events.push(FloorEvent::Arrived(HallCall::of(&passenger)));
        self.waiting.push_back(passenger);
    }

    /// Drop all hall state and re-seed the arrival stream.
    pub(crate) fn reset(&mut self, run_seed: u64) {
        self.waiting.clear();
        self.rng = FloorRng::new(run_seed, self.id);
        self.sampler = DestinationSampler::default();
        self.interval_started = None;
        self.rate_per_minute = 0.0;
        self.next_arrival_in = None;
    }
}
