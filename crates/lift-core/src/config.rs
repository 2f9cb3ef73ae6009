//! Scenario and run configuration.
//!
//! Plain immutable data, typically embedded as constants by a binary or
//! loaded from a JSON/TOML file when the `serde` feature is enabled.
//! Validation happens once, at simulator construction, not here.

use crate::FloorId;

// ── ElevatorConfig ────────────────────────────────────────────────────────────

/// Physical parameters of one car, shared by every car in the bank.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevatorConfig {
    /// Total passenger weight the car holds (a rider usually weighs 1).
    pub capacity: u32,

    /// Seconds spent accelerating out of a stop before full speed.
    pub start_time_secs: f64,

    /// Seconds per floor at full speed.
    pub floor_time_secs: f64,

    /// Seconds spent braking into a committed stop (one floor out).
    pub stop_time_secs: f64,

    /// Seconds the doors stay open at a stop for boarding/alighting.
    pub door_time_secs: f64,
}

impl Default for ElevatorConfig {
    /// A mid-rise traction car: 8 riders, ~1.6 m/s with 4 m floors.
    fn default() -> Self {
        Self {
            capacity: 8,
            start_time_secs: 2.0,
            floor_time_secs: 2.5,
            stop_time_secs: 2.6,
            door_time_secs: 4.0,
        }
    }
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// The building under test: shape, population, and car fleet.
///
/// The traffic profile is passed alongside (it is a trait object, not plain
/// data); everything here serializes cleanly.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    /// Label carried into log lines and output rows.
    pub name: String,

    /// Residents per floor, index = floor number.  Length is the floor count;
    /// at least two floors are required.
    pub residents: Vec<u32>,

    /// Number of cars in the bank.
    pub elevators: u32,

    /// Floor every car parks at before the first tick.
    pub start_floor: FloorId,

    /// Car physics, shared across the bank.
    pub car: ElevatorConfig,
}

impl Scenario {
    #[inline]
    pub fn floor_count(&self) -> usize {
        self.residents.len()
    }
}

// ── SimSettings ───────────────────────────────────────────────────────────────

/// Run-level knobs independent of the building.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimSettings {
    /// Simulated seconds per tick.  Fractional values are fine.
    pub tick_secs: f64,

    /// Arrival generation stops once simulated time reaches this horizon;
    /// the run then drains passengers already in the system.
    pub horizon_secs: f64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,
}

impl Default for SimSettings {
    /// One simulated day at half-second resolution.
    fn default() -> Self {
        Self {
            tick_secs: 0.5,
            horizon_secs: 86_400.0,
            seed: 0,
        }
    }
}
