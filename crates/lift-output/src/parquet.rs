//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `trips.parquet`
//! - `intervals.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{BooleanBuilder, Float64Builder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{IntervalRow, OutputResult, TripRow};

fn trip_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("passenger_id",    DataType::UInt64,  false),
        Field::new("car_id",          DataType::UInt32,  false),
        Field::new("origin_floor",    DataType::UInt32,  false),
        Field::new("exit_floor",      DataType::UInt32,  false),
        Field::new("requested_floor", DataType::UInt32,  false),
        Field::new("rerouted",        DataType::Boolean, false),
        Field::new("created_secs",    DataType::Float64, false),
        Field::new("boarded_secs",    DataType::Float64, false),
        Field::new("exited_secs",     DataType::Float64, false),
        Field::new("wait_secs",       DataType::Float64, false),
        Field::new("ride_secs",       DataType::Float64, false),
    ]))
}

fn interval_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("hour",          DataType::UInt64,  false),
        Field::new("generated",     DataType::UInt64,  false),
        Field::new("exited",        DataType::UInt64,  false),
        Field::new("avg_wait_secs", DataType::Float64, false),
        Field::new("max_wait_secs", DataType::Float64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes simulation output to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    trips:           Option<ArrowWriter<File>>,
    intervals:       Option<ArrowWriter<File>>,
    trip_schema:     Arc<Schema>,
    interval_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let trip_schema = trip_schema();
        let interval_schema = interval_schema();

        let trip_file = File::create(dir.join("trips.parquet"))?;
        let trips = ArrowWriter::try_new(
            trip_file,
            Arc::clone(&trip_schema),
            Some(snappy_props()),
        )?;

        let interval_file = File::create(dir.join("intervals.parquet"))?;
        let intervals = ArrowWriter::try_new(
            interval_file,
            Arc::clone(&interval_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            trips: Some(trips),
            intervals: Some(intervals),
            trip_schema,
            interval_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.trips.as_mut() else {
            return Ok(());
        };

        let mut passenger_ids    = UInt64Builder::new();
        let mut car_ids          = UInt32Builder::new();
        let mut origin_floors    = UInt32Builder::new();
        let mut exit_floors      = UInt32Builder::new();
        let mut requested_floors = UInt32Builder::new();
        let mut rerouteds        = BooleanBuilder::new();
        let mut created          = Float64Builder::new();
        let mut boarded          = Float64Builder::new();
        let mut exited           = Float64Builder::new();
        let mut waits            = Float64Builder::new();
        let mut rides            = Float64Builder::new();

        for row in rows {
            passenger_ids.append_value(row.passenger_id);
            car_ids.append_value(row.car_id);
            origin_floors.append_value(row.origin_floor);
            exit_floors.append_value(row.exit_floor);
            requested_floors.append_value(row.requested_floor);
            rerouteds.append_value(row.rerouted);
            created.append_value(row.created_secs);
            boarded.append_value(row.boarded_secs);
            exited.append_value(row.exited_secs);
            waits.append_value(row.wait_secs);
            rides.append_value(row.ride_secs);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.trip_schema),
            vec![
                Arc::new(passenger_ids.finish()),
                Arc::new(car_ids.finish()),
                Arc::new(origin_floors.finish()),
                Arc::new(exit_floors.finish()),
                Arc::new(requested_floors.finish()),
                Arc::new(rerouteds.finish()),
                Arc::new(created.finish()),
                Arc::new(boarded.finish()),
                Arc::new(exited.finish()),
                Arc::new(waits.finish()),
                Arc::new(rides.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_intervals(&mut self, rows: &[IntervalRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.intervals.as_mut() else {
            return Ok(());
        };

        let mut hours     = UInt64Builder::new();
        let mut generated = UInt64Builder::new();
        let mut exited    = UInt64Builder::new();
        let mut avg_waits = Float64Builder::new();
        let mut max_waits = Float64Builder::new();

        for row in rows {
            hours.append_value(row.hour);
            generated.append_value(row.generated);
            exited.append_value(row.exited);
            avg_waits.append_value(row.avg_wait_secs);
            max_waits.append_value(row.max_wait_secs);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.interval_schema),
            vec![
                Arc::new(hours.finish()),
                Arc::new(generated.finish()),
                Arc::new(exited.finish()),
                Arc::new(avg_waits.finish()),
                Arc::new(max_waits.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.trips.take() {
            w.close()?;
        }
        if let Some(w) = self.intervals.take() {
            w.close()?;
        }
        Ok(())
    }
}
