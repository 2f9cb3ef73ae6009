//! `lift-output` — run statistics and file export for the liftsim simulator.
//!
//! Two halves:
//!
//! - [`StatsCollector`] aggregates wait/ride statistics, hourly interval
//!   buckets, and per-car energy readings.  It is itself a
//!   `lift_sim::SimObserver`, usable alone when no files are wanted.
//! - [`SimOutputObserver`] wraps a collector plus an [`OutputWriter`]
//!   backend, streaming one [`TripRow`] per delivery and the
//!   [`IntervalRow`]s at termination.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                        |
//! |-----------|---------|--------------------------------------|
//! | *(none)*  | CSV     | `trips.csv`, `intervals.csv`         |
//! | `sqlite`  | SQLite  | `output.db`                          |
//! | `parquet` | Parquet | `trips.parquet`, `intervals.parquet` |
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! println!("{}", obs.summary());
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod stats;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{IntervalRow, TripRow};
pub use stats::{CarReport, StatsCollector, StatsSummary};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
