//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing nanosecond counter `SimTime`.  The
//! clock advances in fixed steps:
//!
//!   now = tick_count * tick_duration_ns
//!
//! Using integer nanoseconds as the canonical unit means every comparison
//! against arrival timestamps and interval boundaries is exact (no
//! floating-point drift), while still admitting fractional tick lengths
//! (0.1 s ticks are 100,000,000 ns).  Virtual time is fully decoupled from
//! wall-clock time; a day of building traffic simulates in however long the
//! host needs.

use std::fmt;

pub const NANOS_PER_SECOND: u64 = 1_000_000_000;
pub const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulated instant, in nanoseconds since the run started.
///
/// Stored as `u64`: at nanosecond resolution a u64 lasts ~584 simulated
/// years, far longer than any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// The instant `ns` nanoseconds after `self`.
    #[inline]
    pub fn offset(self, ns: u64) -> SimTime {
        SimTime(self.0 + ns)
    }

    /// Nanoseconds elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0 - earlier.0
    }

    /// Whole and fractional seconds since the run started.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / NANOS_PER_SECOND as f64
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    /// `hh:mm:ss` from run start, with a day prefix once past 24 h.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.0 / NANOS_PER_SECOND;
        let days = total_secs / 86_400;
        let hours = (total_secs % 86_400) / 3_600;
        let minutes = (total_secs % 3_600) / 60;
        let secs = total_secs % 60;
        if days > 0 {
            write!(f, "{days}d {hours:02}:{minutes:02}:{secs:02}")
        } else {
            write!(f, "{hours:02}:{minutes:02}:{secs:02}")
        }
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Fixed-step virtual clock.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.  There
/// is no suspension and no wall-clock coupling: it is a counter plus unit
/// conversion arithmetic.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    tick_ns: u64,
    now: SimTime,
}

impl SimClock {
    /// Create a clock advancing `tick_secs` simulated seconds per step.
    /// Fractional tick lengths are rounded to whole nanoseconds once, here.
    pub fn new(tick_secs: f64) -> Self {
        debug_assert!(tick_secs > 0.0, "tick length must be positive");
        Self {
            tick_ns: Self::secs_to_duration(tick_secs),
            now: SimTime::ZERO,
        }
    }

    /// The current simulated instant.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn step(&mut self) {
        self.now = self.now + self.tick_ns;
    }

    /// Length of one tick in nanoseconds.
    #[inline]
    pub fn tick_duration(&self) -> u64 {
        self.tick_ns
    }

    /// Nanoseconds elapsed since `origin` (an earlier `now()` reading).
    #[inline]
    pub fn elapsed_since(&self, origin: SimTime) -> u64 {
        self.now.since(origin)
    }

    /// Rewind to the start of the run.
    pub fn reset(&mut self) {
        self.now = SimTime::ZERO;
    }

    // ── Unit conversions ──────────────────────────────────────────────────

    /// Simulated minutes (fractional) to a nanosecond duration.
    #[inline]
    pub fn minutes_to_duration(minutes: f64) -> u64 {
        (minutes * NANOS_PER_MINUTE as f64).round() as u64
    }

    /// Simulated seconds (fractional) to a nanosecond duration.
    #[inline]
    pub fn secs_to_duration(secs: f64) -> u64 {
        (secs * NANOS_PER_SECOND as f64).round() as u64
    }

    /// A nanosecond duration to fractional simulated seconds.
    #[inline]
    pub fn duration_to_secs(ns: u64) -> f64 {
        ns as f64 / NANOS_PER_SECOND as f64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.now)
    }
}
