//! Run statistics: whole-run aggregates plus hourly interval buckets.

use std::fmt;

use lift_building::Building;
use lift_core::{ElevatorId, FloorId, HallCall, NANOS_PER_SECOND, Passenger, SimClock, SimTime};
use lift_sim::SimObserver;

use crate::row::IntervalRow;

const NANOS_PER_HOUR: u64 = 3_600 * NANOS_PER_SECOND;

/// Waits longer than this count toward [`StatsSummary::long_wait_share`].
const LONG_WAIT_SECS: f64 = 60.0;

// ── Collector ─────────────────────────────────────────────────────────────────

/// A [`SimObserver`] that accumulates wait and ride statistics.
///
/// Generation events land in the hourly bucket of the hall call; a delivery
/// lands its wait in the bucket of the exit instant, since that is when the
/// collector learns it.  Per-car energy and resting floors are read from the
/// building once, when the run terminates.
///
/// The collector is pure aggregation: it never buffers individual trips.
/// Pair it with a writer through [`SimOutputObserver`] to get row-level
/// export as well.
///
/// [`SimOutputObserver`]: crate::SimOutputObserver
#[derive(Debug, Default)]
pub struct StatsCollector {
    generated:   u64,
    exited:      u64,
    wait_sum:    f64,
    wait_sq_sum: f64,
    wait_max:    f64,
    long_waits:  u64,
    ride_sum:    f64,
    buckets:     Vec<IntervalBucket>,
    energy:      f64,
    cars:        Vec<CarReport>,
}

#[derive(Debug, Default, Clone, Copy)]
struct IntervalBucket {
    generated: u64,
    exited:    u64,
    wait_sum:  f64,
    wait_max:  f64,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn generated(&self) -> u64 {
        self.generated
    }

    #[inline]
    pub fn exited(&self) -> u64 {
        self.exited
    }

    /// Per-car final readings.  Empty until the run terminates.
    pub fn car_reports(&self) -> &[CarReport] {
        &self.cars
    }

    /// One row per simulated hour touched so far, in order.
    pub fn interval_rows(&self) -> Vec<IntervalRow> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(hour, b)| IntervalRow {
                hour:          hour as u64,
                generated:     b.generated,
                exited:        b.exited,
                avg_wait_secs: if b.exited == 0 { 0.0 } else { b.wait_sum / b.exited as f64 },
                max_wait_secs: b.wait_max,
            })
            .collect()
    }

    /// Aggregate results over everything recorded so far.
    pub fn summary(&self) -> StatsSummary {
        let n = self.exited as f64;
        let avg_wait = if self.exited == 0 { 0.0 } else { self.wait_sum / n };
        // Population variance; rounding can push it a hair below zero.
        let variance = if self.exited == 0 {
            0.0
        } else {
            (self.wait_sq_sum / n - avg_wait * avg_wait).max(0.0)
        };
        StatsSummary {
            generated:       self.generated,
            exited:          self.exited,
            avg_wait_secs:   avg_wait,
            wait_std_secs:   variance.sqrt(),
            max_wait_secs:   self.wait_max,
            long_wait_share: if self.exited == 0 { 0.0 } else { self.long_waits as f64 / n },
            avg_ride_secs:   if self.exited == 0 { 0.0 } else { self.ride_sum / n },
            total_energy:    self.energy,
        }
    }

    fn bucket(&mut self, at: SimTime) -> &mut IntervalBucket {
        let hour = (at.0 / NANOS_PER_HOUR) as usize;
        if self.buckets.len() <= hour {
            self.buckets.resize_with(hour + 1, IntervalBucket::default);
        }
        &mut self.buckets[hour]
    }
}

impl SimObserver for StatsCollector {
    fn on_passenger_generated(&mut self, call: &HallCall) {
        self.generated += 1;
        self.bucket(call.placed_at).generated += 1;
    }

    fn on_passenger_exited(&mut self, now: SimTime, _elevator: ElevatorId, passenger: &Passenger) {
        // A delivered passenger always carries a boarding record.
        let Some(boarded) = passenger.boarded_at() else { return };
        let wait = SimClock::duration_to_secs(boarded.since(passenger.created_at()));
        let ride = SimClock::duration_to_secs(now.since(boarded));

        self.exited += 1;
        self.wait_sum += wait;
        self.wait_sq_sum += wait * wait;
        self.wait_max = self.wait_max.max(wait);
        if wait > LONG_WAIT_SECS {
            self.long_waits += 1;
        }
        self.ride_sum += ride;

        let bucket = self.bucket(now);
        bucket.exited += 1;
        bucket.wait_sum += wait;
        bucket.wait_max = bucket.wait_max.max(wait);
    }

    fn on_done(&mut self, _now: SimTime, building: &Building) {
        self.energy = building.total_energy();
        self.cars = building
            .elevators()
            .iter()
            .map(|e| CarReport {
                car:         e.id(),
                energy:      e.energy().total(),
                final_floor: e.floor(),
            })
            .collect();
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Final per-car readings, taken when the run terminates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarReport {
    pub car:         ElevatorId,
    /// Energy units this car drew across the run.
    pub energy:      f64,
    /// Where the car came to rest.
    pub final_floor: FloorId,
}

/// Aggregate results of a run.
///
/// Waits are measured from hall call to boarding; rides from boarding to
/// exit.  Averages and the standard deviation are over delivered passengers
/// and are 0 when nothing was delivered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSummary {
    pub generated:       u64,
    pub exited:          u64,
    pub avg_wait_secs:   f64,
    pub wait_std_secs:   f64,
    pub max_wait_secs:   f64,
    /// Share of delivered passengers who waited longer than 60 s.
    pub long_wait_share: f64,
    pub avg_ride_secs:   f64,
    /// Combined energy units drawn by the whole bank.
    pub total_energy:    f64,
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "passengers: {} generated, {} delivered", self.generated, self.exited)?;
        writeln!(
            f,
            "wait:       avg {:.1} s, std {:.1} s, max {:.1} s ({:.1}% over {LONG_WAIT_SECS} s)",
            self.avg_wait_secs,
            self.wait_std_secs,
            self.max_wait_secs,
            self.long_wait_share * 100.0,
        )?;
        writeln!(f, "ride:       avg {:.1} s", self.avg_ride_secs)?;
        write!(f, "energy:     {:.1} units", self.total_energy)
    }
}
