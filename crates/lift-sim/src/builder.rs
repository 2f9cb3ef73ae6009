//! Fluent builder for constructing a [`Simulator`].

use lift_building::Building;
use lift_core::{Scenario, SimSettings};
use lift_dispatch::{ControlSystem, SchedulingPolicy};
use lift_traffic::{ScheduledArrival, TrafficProfile};

use crate::{SimError, SimResult, Simulator};

/// Fluent builder for [`Simulator`].
///
/// # Required inputs
///
/// - [`Scenario`] — floor census, car fleet, car timing
/// - `Box<dyn TrafficProfile>` — arrival model (e.g.
///   [`IntervalProfile::week_day`][lift_traffic::IntervalProfile::week_day])
/// - `Box<dyn SchedulingPolicy>` — dispatch strategy, usually from
///   [`PolicyKind::build`][lift_dispatch::PolicyKind::build]
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                      |
/// |-----------------|----------------------------------------------|
/// | `.settings(s)`  | `SimSettings::default()` (0.5 s tick, 24 h)  |
/// | `.schedule(v)`  | No planned arrivals                          |
/// | `.replay(v)`    | Off — arrivals come from the profile         |
///
/// # Example
///
/// ```rust,ignore
/// let policy = PolicyKind::Zoning { zones: 2 }.build(scenario.floor_count(), 4)?;
/// let mut sim = SimBuilder::new(scenario, Box::new(IntervalProfile::week_day()), policy)
///     .settings(SimSettings { horizon_secs: 8.0 * 3600.0, ..Default::default() })
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    scenario: Scenario,
    profile:  Box<dyn TrafficProfile>,
    policy:   Box<dyn SchedulingPolicy>,
    settings: SimSettings,
    plan:     Vec<ScheduledArrival>,
    replay:   bool,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(
        scenario: Scenario,
        profile: Box<dyn TrafficProfile>,
        policy: Box<dyn SchedulingPolicy>,
    ) -> Self {
        Self {
            scenario,
            profile,
            policy,
            settings: SimSettings::default(),
            plan: Vec::new(),
            replay: false,
        }
    }

    /// Supply tick length, generation horizon, and seed.
    pub fn settings(mut self, settings: SimSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Supply planned arrivals injected alongside the sampled traffic.
    /// Entries need not be sorted; they are ordered by arrival instant.
    pub fn schedule(mut self, plan: Vec<ScheduledArrival>) -> Self {
        self.plan = plan;
        self
    }

    /// Supply the exact arrival stream and disable stochastic sampling.
    /// The run draws passengers from `plan` alone, which makes two runs
    /// with different seeds directly comparable.
    pub fn replay(mut self, plan: Vec<ScheduledArrival>) -> Self {
        self.plan = plan;
        self.replay = true;
        self
    }

    /// Validate inputs, construct the building, park the cars, and return a
    /// ready-to-run [`Simulator`].
    pub fn build(self) -> SimResult<Simulator> {
        // Written as negations so NaN settings fail too.
        if !(self.settings.tick_secs > 0.0) {
            return Err(SimError::TickLength(self.settings.tick_secs));
        }
        if !(self.settings.horizon_secs >= 0.0) {
            return Err(SimError::Horizon(self.settings.horizon_secs));
        }
        if self.scenario.car.capacity == 0 {
            return Err(SimError::ZeroCapacity);
        }

        let building = Building::new(&self.scenario, self.profile, self.settings.seed)?;
        let control = ControlSystem::new(self.policy);
        Ok(Simulator::assemble(
            self.scenario.name,
            self.settings,
            building,
            control,
            self.plan,
            self.replay,
        ))
    }
}
