//! The `OutputWriter` trait implemented by all backend writers.

use crate::{IntervalRow, OutputResult, TripRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// Methods are fallible at this level; [`SimOutputObserver`] swallows the
/// errors during the run and hands the first one back through
/// [`take_error`].
///
/// [`SimOutputObserver`]: crate::SimOutputObserver
/// [`take_error`]: crate::SimOutputObserver::take_error
pub trait OutputWriter {
    /// Write a batch of finished trips.
    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()>;

    /// Write a batch of hourly summaries.
    fn write_intervals(&mut self, rows: &[IntervalRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
