//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trips.csv`
//! - `intervals.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{IntervalRow, OutputResult, TripRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    trips:     Writer<File>,
    intervals: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trips = Writer::from_path(dir.join("trips.csv"))?;
        trips.write_record([
            "passenger_id",
            "car_id",
            "origin_floor",
            "exit_floor",
            "requested_floor",
            "rerouted",
            "created_secs",
            "boarded_secs",
            "exited_secs",
            "wait_secs",
            "ride_secs",
        ])?;

        let mut intervals = Writer::from_path(dir.join("intervals.csv"))?;
        intervals.write_record(["hour", "generated", "exited", "avg_wait_secs", "max_wait_secs"])?;

        Ok(Self {
            trips,
            intervals,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()> {
        for row in rows {
            self.trips.write_record(&[
                row.passenger_id.to_string(),
                row.car_id.to_string(),
                row.origin_floor.to_string(),
                row.exit_floor.to_string(),
                row.requested_floor.to_string(),
                (row.rerouted as u8).to_string(),
                row.created_secs.to_string(),
                row.boarded_secs.to_string(),
                row.exited_secs.to_string(),
                row.wait_secs.to_string(),
                row.ride_secs.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_intervals(&mut self, rows: &[IntervalRow]) -> OutputResult<()> {
        for row in rows {
            self.intervals.write_record(&[
                row.hour.to_string(),
                row.generated.to_string(),
                row.exited.to_string(),
                row.avg_wait_secs.to_string(),
                row.max_wait_secs.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trips.flush()?;
        self.intervals.flush()?;
        Ok(())
    }
}
