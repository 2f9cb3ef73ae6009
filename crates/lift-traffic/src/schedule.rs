//! Pre-made arrival schedules: replay input and relay injections.
//!
//! # CSV format
//!
//! One row per scheduled arrival, sorted or unsorted (the loader sorts):
//!
//! ```csv
//! arrival_secs,floor,destination
//! 0.0,0,3
//! 12.5,2,0
//! 45.0,0,5
//! ```
//!
//! Passenger IDs are not part of the file; the simulator assigns them from
//! its allocator in consumption order, so replayed runs number passengers
//! exactly like stochastic ones.

use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use lift_core::{FloorId, SimClock, SimTime};

use crate::TrafficError;

// ── ScheduledArrival ──────────────────────────────────────────────────────────

/// One future arrival: who shows up where, when, and where they want to go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScheduledArrival {
    pub at: SimTime,
    pub floor: FloorId,
    pub destination: FloorId,
}

// ── ArrivalSchedule ───────────────────────────────────────────────────────────

/// Ordered queue of scheduled arrivals, consumed strictly head-first.
///
/// Two producers feed it: a replay CSV loaded up front, and zone policies
/// injecting relay continuations mid-run.  Injections go to the *front*,
/// they are due immediately and must not wait behind later replay entries.
///
/// Consumption is head-only: a due entry for floor B queued behind a
/// not-yet-due entry for floor A waits until A's head clears.  Each floor
/// takes at most one entry per tick.
#[derive(Debug, Default)]
pub struct ArrivalSchedule {
    entries: VecDeque<ScheduledArrival>,
}

impl ArrivalSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from unordered entries; sorts stably by timestamp.
    pub fn from_entries(mut entries: Vec<ScheduledArrival>) -> Self {
        entries.sort_by_key(|e| e.at);
        Self {
            entries: entries.into(),
        }
    }

    /// Queue a relay continuation ahead of everything else.
    pub fn inject_front(&mut self, arrival: ScheduledArrival) {
        self.entries.push_front(arrival);
    }

    /// Pop the head if it is due (`at <= now`) and belongs to `floor`.
    pub fn pop_due(&mut self, now: SimTime, floor: FloorId) -> Option<ScheduledArrival> {
        match self.entries.front() {
            Some(head) if head.at <= now && head.floor == floor => self.entries.pop_front(),
            _ => None,
        }
    }

    pub fn peek(&self) -> Option<&ScheduledArrival> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything (fresh run after a reset).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ArrivalRecord {
    arrival_secs: f64,
    floor:        u32,
    destination:  u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a replay schedule from a CSV file.
pub fn load_schedule_csv(path: &Path) -> Result<ArrivalSchedule, TrafficError> {
    let file = std::fs::File::open(path).map_err(TrafficError::Io)?;
    load_schedule_reader(file)
}

/// Like [`load_schedule_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded schedules.
pub fn load_schedule_reader<R: Read>(reader: R) -> Result<ArrivalSchedule, TrafficError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();

    for result in csv_reader.deserialize::<ArrivalRecord>() {
        let row = result.map_err(|e| TrafficError::Parse(e.to_string()))?;
        if !row.arrival_secs.is_finite() || row.arrival_secs < 0.0 {
            return Err(TrafficError::Parse(format!(
                "invalid arrival time {}: must be a non-negative number of seconds",
                row.arrival_secs
            )));
        }
        if row.floor == row.destination {
            return Err(TrafficError::Parse(format!(
                "arrival at {} s travels from floor {} to itself",
                row.arrival_secs, row.floor
            )));
        }
        entries.push(ScheduledArrival {
            at: SimTime(SimClock::secs_to_duration(row.arrival_secs)),
            floor: FloorId(row.floor),
            destination: FloorId(row.destination),
        });
    }

    Ok(ArrivalSchedule::from_entries(entries))
}
