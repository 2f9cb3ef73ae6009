//! Plain data row types written by output backends.

/// One delivered passenger's complete trip record.
///
/// All instants are fractional simulated seconds since the run started.
/// `wait_secs` and `ride_secs` repeat what the three timestamps imply so
/// downstream analysis reads them without re-deriving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripRow {
    pub passenger_id:    u64,
    /// Car that delivered the passenger.
    pub car_id:          u32,
    pub origin_floor:    u32,
    /// Floor the passenger stepped out on.
    pub exit_floor:      u32,
    /// Floor the passenger originally asked for.  Differs from `exit_floor`
    /// when a zone policy clipped the trip to a boundary.
    pub requested_floor: u32,
    pub rerouted:        bool,
    pub created_secs:    f64,
    pub boarded_secs:    f64,
    pub exited_secs:     f64,
    pub wait_secs:       f64,
    pub ride_secs:       f64,
}

/// Aggregate tallies for one simulated hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalRow {
    /// Hour index since the run started (hour 0 covers the first 3600 s).
    pub hour:          u64,
    /// Passengers that placed a hall call during this hour.
    pub generated:     u64,
    /// Passengers delivered during this hour.
    pub exited:        u64,
    /// Mean wait among this hour's deliveries; 0 when none exited.
    pub avg_wait_secs: f64,
    pub max_wait_secs: f64,
}
