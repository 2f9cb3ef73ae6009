//! Traffic profiles: when passengers show up and where they want to go.
//!
//! # Traffic model
//!
//! A profile divides the day into fixed-length intervals.  Each interval
//! carries an *arrival fraction* (the share of the building population that
//! arrives per interval) split across three flows:
//!
//! | Flow         | Origin            | Destination weights                |
//! |--------------|-------------------|------------------------------------|
//! | `up`         | lobby             | upper floors, by resident count    |
//! | `down`       | upper floors      | lobby                              |
//! | `interfloor` | upper floors      | other upper floors, by residents   |
//!
//! Destination values are *weights*, not normalized probabilities; the
//! per-floor sampler normalizes whatever the profile hands it, so a profile
//! only has to get relative proportions right.
//!
//! Expected arrivals per floor per interval:
//!
//!   lobby:     fraction * population * up
//!   floor f>0: fraction * population * (down + interfloor) * residents[f] / upper_population

use lift_core::{FloorId, FloorRng, SimClock, SimTime};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Pluggable arrival-rate and destination table.
///
/// `Send + Sync` so a building can share one profile across a parallel floor
/// phase.  Implementations must be pure lookups: the same arguments always
/// produce the same answer within one interval.
pub trait TrafficProfile: Send + Sync {
    /// Length of one traffic interval in nanoseconds.
    fn interval_length(&self) -> u64;

    /// Expected passenger arrivals at `floor` during the interval containing
    /// `now`, given the building's per-floor resident counts.
    fn average_arrivals(&self, residents: &[u32], floor: FloorId, now: SimTime) -> f64;

    /// Relative weight of a trip from `from` to `to` during the interval
    /// containing `now`.  Zero for `from == to`.
    fn destination_weight(&self, residents: &[u32], from: FloorId, to: FloorId, now: SimTime)
    -> f64;
}

// ── Interval tables ───────────────────────────────────────────────────────────

/// One interval's arrival intensity and flow split.
///
/// `up + down + interfloor` should sum to 1; the arithmetic tolerates any
/// positive weights since samplers normalize.
#[derive(Copy, Clone, Debug)]
pub struct TrafficInterval {
    /// Fraction of the building population arriving during this interval.
    pub arrival_fraction: f64,
    pub up: f64,
    pub down: f64,
    pub interfloor: f64,
}

/// Table-driven profile cycling through fixed-length intervals.
pub struct IntervalProfile {
    intervals: Vec<TrafficInterval>,
    interval_ns: u64,
}

/// (arrival fraction, up, down, interfloor) per hour of a working day.
/// Morning up-peak, a two-sided lunch bump, and an evening down-peak.
const WEEK_DAY_HOURS: [(f64, f64, f64, f64); 24] = [
    (0.002, 0.50, 0.50, 0.00), // 00: night porter traffic
    (0.001, 0.50, 0.50, 0.00), // 01
    (0.001, 0.50, 0.50, 0.00), // 02
    (0.001, 0.50, 0.50, 0.00), // 03
    (0.002, 0.60, 0.40, 0.00), // 04
    (0.005, 0.70, 0.20, 0.10), // 05: earliest staff
    (0.020, 0.80, 0.10, 0.10), // 06
    (0.080, 0.85, 0.05, 0.10), // 07: up-peak builds
    (0.120, 0.90, 0.05, 0.05), // 08: up-peak crest
    (0.060, 0.60, 0.15, 0.25), // 09
    (0.040, 0.30, 0.20, 0.50), // 10: interfloor business
    (0.050, 0.25, 0.35, 0.40), // 11
    (0.100, 0.35, 0.40, 0.25), // 12: lunch out
    (0.100, 0.45, 0.30, 0.25), // 13: lunch back
    (0.040, 0.30, 0.20, 0.50), // 14
    (0.040, 0.25, 0.30, 0.45), // 15
    (0.060, 0.15, 0.55, 0.30), // 16: leavers start
    (0.120, 0.05, 0.85, 0.10), // 17: down-peak crest
    (0.070, 0.05, 0.85, 0.10), // 18
    (0.030, 0.10, 0.70, 0.20), // 19
    (0.015, 0.20, 0.60, 0.20), // 20
    (0.010, 0.30, 0.50, 0.20), // 21
    (0.005, 0.30, 0.50, 0.20), // 22
    (0.003, 0.40, 0.40, 0.20), // 23
];

impl IntervalProfile {
    /// A profile cycling through `intervals`, each `interval_secs` long.
    ///
    /// # Panics
    /// Panics if `intervals` is empty or `interval_secs` is not positive.
    pub fn new(intervals: Vec<TrafficInterval>, interval_secs: f64) -> Self {
        assert!(!intervals.is_empty(), "a profile needs at least one interval");
        assert!(interval_secs > 0.0, "interval length must be positive");
        Self {
            intervals,
            interval_ns: SimClock::secs_to_duration(interval_secs),
        }
    }

    /// A typical office working day, hour by hour.
    pub fn week_day() -> Self {
        let intervals = WEEK_DAY_HOURS
            .iter()
            .map(|&(arrival_fraction, up, down, interfloor)| TrafficInterval {
                arrival_fraction,
                up,
                down,
                interfloor,
            })
            .collect();
        Self::new(intervals, 3_600.0)
    }

    /// Flat traffic: the same arrival fraction all day, flows balanced.
    pub fn uniform(arrival_fraction: f64) -> Self {
        Self::new(
            vec![TrafficInterval {
                arrival_fraction,
                up: 0.35,
                down: 0.35,
                interfloor: 0.30,
            }],
            3_600.0,
        )
    }

    /// Sustained incoming traffic, the classic morning stress test.
    pub fn up_peak(arrival_fraction: f64) -> Self {
        Self::new(
            vec![TrafficInterval {
                arrival_fraction,
                up: 0.90,
                down: 0.05,
                interfloor: 0.05,
            }],
            3_600.0,
        )
    }

    /// The interval active at `now`; the table cycles past its end.
    fn at(&self, now: SimTime) -> &TrafficInterval {
        let idx = (now.0 / self.interval_ns) as usize % self.intervals.len();
        &self.intervals[idx]
    }
}

impl TrafficProfile for IntervalProfile {
    fn interval_length(&self) -> u64 {
        self.interval_ns
    }

    fn average_arrivals(&self, residents: &[u32], floor: FloorId, now: SimTime) -> f64 {
        let iv = self.at(now);
        let population: u32 = residents.iter().sum();
        let building_arrivals = iv.arrival_fraction * population as f64;

        if floor == FloorId::LOBBY {
            return building_arrivals * iv.up;
        }
        let upper: u32 = population - residents[FloorId::LOBBY.index()];
        if upper == 0 {
            return 0.0;
        }
        let share = residents[floor.index()] as f64 / upper as f64;
        building_arrivals * (iv.down + iv.interfloor) * share
    }

    fn destination_weight(
        &self,
        residents: &[u32],
        from: FloorId,
        to: FloorId,
        now: SimTime,
    ) -> f64 {
        if from == to {
            return 0.0;
        }
        let iv = self.at(now);
        if from == FloorId::LOBBY {
            // Incoming trip: upper floors weighted by who works there.
            return residents[to.index()] as f64;
        }
        if to == FloorId::LOBBY {
            return iv.down;
        }
        // Interfloor trip, spread over the other upper floors by residents.
        let upper: u32 = residents.iter().sum::<u32>()
            - residents[FloorId::LOBBY.index()]
            - residents[from.index()];
        if upper == 0 {
            return 0.0;
        }
        iv.interfloor * residents[to.index()] as f64 / upper as f64
    }
}

// ── Inter-arrival sampling ────────────────────────────────────────────────────

/// Draw the next inter-arrival gap of a Poisson process.
///
/// `rate_per_minute` is expected arrivals per simulated minute; the gap is
/// exponential: `gap = -ln(1 - U) / rate` with U uniform in [0, 1).  Returns
/// `None` when the rate is zero or negative (no arrivals this interval).
pub fn exponential_gap(rng: &mut FloorRng, rate_per_minute: f64) -> Option<u64> {
    if rate_per_minute <= 0.0 {
        return None;
    }
    let u: f64 = rng.gen_range(0.0..1.0);
    let minutes = -(1.0 - u).ln() / rate_per_minute;
    Some(SimClock::minutes_to_duration(minutes))
}
