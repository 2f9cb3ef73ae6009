//! Deterministic per-floor and run-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each floor gets its own independent `SmallRng` seeded by:
//!
//!   seed = run_seed XOR (floor_number * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive floor numbers uniformly across the seed space.
//! This means:
//!
//! - Floors never share RNG state, so the order floors are updated in (or
//!   whether they are updated in parallel) cannot change what they draw.
//! - A run is reproducible from its single `u64` seed, and stays
//!   reproducible when the building gains floors at the top.
//!
//! There is deliberately no process-wide random source: every stream is
//! owned by one simulation instance and dies with it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::FloorId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── FloorRng ──────────────────────────────────────────────────────────────────

/// Per-floor deterministic RNG driving arrival gaps and destination draws.
///
/// Created once per floor at building construction and re-created on
/// `reset(seed)`.  Each floor owns exactly one, so a parallel fan-out over
/// floors hands every worker a disjoint `&mut` stream.
#[derive(Debug)]
pub struct FloorRng(SmallRng);

impl FloorRng {
    /// Seed deterministically from the run's seed and a floor number.
    pub fn new(run_seed: u64, floor: FloorId) -> Self {
        let seed = run_seed ^ (floor.0 as u64).wrapping_mul(MIXING_CONSTANT);
        FloorRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG for everything that is not tied to a single floor
/// (randomized test drivers, ad-hoc scenario generation).
///
/// Single-threaded by design; derive per-worker streams with [`SimRng::child`]
/// if a caller ever needs parallel randomness.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
