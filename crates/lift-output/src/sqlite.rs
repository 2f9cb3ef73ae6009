//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `trips` and `intervals`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{IntervalRow, OutputResult, TripRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS trips (
                 passenger_id    INTEGER NOT NULL,
                 car_id          INTEGER NOT NULL,
                 origin_floor    INTEGER NOT NULL,
                 exit_floor      INTEGER NOT NULL,
                 requested_floor INTEGER NOT NULL,
                 rerouted        INTEGER NOT NULL,
                 created_secs    REAL NOT NULL,
                 boarded_secs    REAL NOT NULL,
                 exited_secs     REAL NOT NULL,
                 wait_secs       REAL NOT NULL,
                 ride_secs       REAL NOT NULL
             );
             CREATE TABLE IF NOT EXISTS intervals (
                 hour          INTEGER PRIMARY KEY,
                 generated     INTEGER NOT NULL,
                 exited        INTEGER NOT NULL,
                 avg_wait_secs REAL NOT NULL,
                 max_wait_secs REAL NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO trips \
                 (passenger_id, car_id, origin_floor, exit_floor, requested_floor, \
                  rerouted, created_secs, boarded_secs, exited_secs, wait_secs, ride_secs) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.passenger_id,
                    row.car_id,
                    row.origin_floor,
                    row.exit_floor,
                    row.requested_floor,
                    row.rerouted as i64,
                    row.created_secs,
                    row.boarded_secs,
                    row.exited_secs,
                    row.wait_secs,
                    row.ride_secs,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_intervals(&mut self, rows: &[IntervalRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO intervals \
                 (hour, generated, exited, avg_wait_secs, max_wait_secs) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.hour,
                    row.generated,
                    row.exited,
                    row.avg_wait_secs,
                    row.max_wait_secs,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
