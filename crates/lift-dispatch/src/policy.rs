//! The `SchedulingPolicy` trait — the main extension point for dispatch
//! strategies.

use lift_building::Building;
use lift_core::{ElevatorId, FloorId, HallCall, Passenger, PassengerId, SimClock, SimTime};
use lift_traffic::ArrivalSchedule;

/// Mutable view of the simulation handed to every policy callback.
///
/// Built fresh by the control system for each call; all borrows end when the
/// callback returns.  Policies command cars through `building`, read the
/// shared hall queue through `hall`, and may inject continuation arrivals
/// through `schedule`.
pub struct DispatchCtx<'a> {
    pub clock:    &'a SimClock,
    pub building: &'a mut Building,
    /// Hall calls in arrival order.  Owned by the control system; policies
    /// never mutate it directly.
    pub hall:     &'a HallQueue,
    pub schedule: &'a mut ArrivalSchedule,
}

impl DispatchCtx<'_> {
    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }
}

/// Pluggable dispatch strategy.
///
/// One policy instance is active per simulation.  The control system invokes
/// the hooks as events arrive and [`update`][Self::update] once per tick
/// after the physical state has advanced, so a policy always sees the hall
/// queue as shaped by this tick's arrivals.
///
/// Policies keep their own bookkeeping in `self`; anything shared lives in
/// the building or the hall queue.  Side effects go through the car command
/// surface (`move_towards`, `stop_at_next_floor`) and re-route records; a
/// command the car cannot honour is silently dropped rather than an error,
/// so a policy mistake degrades service instead of ending the run.
///
/// Only `update` and `name` are required.
pub trait SchedulingPolicy: Send {
    /// Short label carried into logs and output rows.
    fn name(&self) -> &'static str;

    /// A passenger joined the hall queue.  `call` is already in `ctx.hall`.
    fn passenger_arrived(&mut self, _call: HallCall, _ctx: &mut DispatchCtx<'_>) {}

    /// A passenger stepped into `elevator`.  The matching hall call has
    /// already been removed; the destination stop is committed *after* this
    /// hook returns, so re-routing the passenger here still takes effect.
    fn passenger_boarded(
        &mut self,
        _elevator: ElevatorId,
        _passenger: PassengerId,
        _ctx: &mut DispatchCtx<'_>,
    ) {
    }

    /// A passenger left `elevator` at its destination.
    fn passenger_exited(
        &mut self,
        _elevator: ElevatorId,
        _passenger: &Passenger,
        _ctx: &mut DispatchCtx<'_>,
    ) {
    }

    /// `elevator` drained its stop queue and parked.
    fn on_idle(&mut self, _elevator: ElevatorId, _ctx: &mut DispatchCtx<'_>) {}

    /// `elevator` reversed its committed direction.
    fn on_turned(&mut self, _elevator: ElevatorId, _ctx: &mut DispatchCtx<'_>) {}

    /// This policy just became active.  Rebuild private bookkeeping from the
    /// shared hall queue here.
    fn activated(&mut self, _ctx: &mut DispatchCtx<'_>) {}

    /// Once per tick, after floors and cars have updated.
    fn update(&mut self, ctx: &mut DispatchCtx<'_>);
}

// ── HallQueue ─────────────────────────────────────────────────────────────────

/// Hall calls not yet answered, in arrival order.
///
/// A call enters when its passenger joins a floor queue and leaves when the
/// passenger boards a car; the underlying passenger stays on the floor the
/// whole time.  Kept as a plain vector: scans dominate, and the queue stays
/// small relative to the building.
#[derive(Debug, Default)]
pub struct HallQueue {
    calls: Vec<HallCall>,
}

impl HallQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, call: HallCall) {
        self.calls.push(call);
    }

    /// Remove the call of `passenger`, keeping arrival order.
    pub(crate) fn remove(&mut self, passenger: PassengerId) -> Option<HallCall> {
        let at = self.calls.iter().position(|c| c.passenger == passenger)?;
        Some(self.calls.remove(at))
    }

    pub(crate) fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &HallCall> + '_ {
        self.calls.iter()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Unanswered calls placed at `floor`.
    pub fn waiting_at(&self, floor: FloorId) -> usize {
        self.calls.iter().filter(|c| c.floor == floor).count()
    }

    /// The longest-waiting call.
    pub fn oldest(&self) -> Option<&HallCall> {
        self.calls.first()
    }
}
