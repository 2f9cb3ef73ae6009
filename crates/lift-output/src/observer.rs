//! `SimOutputObserver<W>` — bridges the tick loop to an `OutputWriter`.

use lift_building::Building;
use lift_core::{ElevatorId, HallCall, Passenger, SimClock, SimTime};
use lift_sim::SimObserver;

use crate::OutputError;
use crate::row::TripRow;
use crate::stats::{StatsCollector, StatsSummary};
use crate::writer::OutputWriter;

/// A [`SimObserver`] that feeds a [`StatsCollector`] and streams trip rows
/// to any [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Each delivery is written as it happens; the hourly interval rows are
/// written once at termination, followed by `finish()`.  Errors from the
/// writer are stored internally because `SimObserver` methods have no return
/// value.  After the run, check for them with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    stats:      StatsCollector,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            stats: StatsCollector::new(),
            last_error: None,
        }
    }

    /// The running statistics accumulated so far.
    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    /// Shorthand for `self.stats().summary()`.
    pub fn summary(&self) -> StatsSummary {
        self.stats.summary()
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_passenger_generated(&mut self, call: &HallCall) {
        self.stats.on_passenger_generated(call);
    }

    fn on_passenger_exited(&mut self, now: SimTime, elevator: ElevatorId, passenger: &Passenger) {
        self.stats.on_passenger_exited(now, elevator, passenger);

        let Some(boarded) = passenger.boarded_at() else { return };
        let row = TripRow {
            passenger_id:    passenger.id().0,
            car_id:          elevator.0,
            origin_floor:    passenger.arrival_floor().0,
            exit_floor:      passenger.destination().0,
            requested_floor: passenger.original_destination().0,
            rerouted:        passenger.is_rerouted(),
            created_secs:    passenger.created_at().as_secs_f64(),
            boarded_secs:    boarded.as_secs_f64(),
            exited_secs:     now.as_secs_f64(),
            wait_secs:       SimClock::duration_to_secs(boarded.since(passenger.created_at())),
            ride_secs:       SimClock::duration_to_secs(now.since(boarded)),
        };
        let result = self.writer.write_trips(&[row]);
        self.store_err(result);
    }

    fn on_done(&mut self, now: SimTime, building: &Building) {
        self.stats.on_done(now, building);

        let intervals = self.stats.interval_rows();
        let result = self.writer.write_intervals(&intervals);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
