//! A meta-policy that hosts several strategies and switches between them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lift_core::{ElevatorId, HallCall, Passenger, PassengerId};
use log::info;

use crate::error::{DispatchError, DispatchResult};
use crate::policy::{DispatchCtx, SchedulingPolicy};

/// Handle for selecting the active policy from outside the simulation.
///
/// The decision procedure (an experiment driver, a trained controller) holds
/// this while the [`SwitchingPolicy`] itself is boxed away inside the control
/// system.  A selection takes effect at the policy's next `update`.
#[derive(Debug, Clone)]
pub struct PolicySwitch {
    target: Arc<AtomicUsize>,
    count:  usize,
}

impl PolicySwitch {
    /// Request a switch to `index`.  Rejects out-of-range indices so a bad
    /// request never reaches the simulation.
    pub fn select(&self, index: usize) -> DispatchResult<()> {
        if index >= self.count {
            return Err(DispatchError::PolicyIndexOutOfRange { index, count: self.count });
        }
        self.target.store(index, Ordering::Relaxed);
        Ok(())
    }

    /// Index the handle last requested.
    pub fn selected(&self) -> usize {
        self.target.load(Ordering::Relaxed)
    }
}

/// Hosts a fixed set of policies and delegates the whole contract to the
/// active one.  Switching is the only transition: nothing in here decides
/// when to switch, that call always comes from outside.
pub struct SwitchingPolicy {
    policies: Vec<Box<dyn SchedulingPolicy>>,
    active:   usize,
    target:   Arc<AtomicUsize>,
}

impl SwitchingPolicy {
    /// Wrap `policies`, starting with the first one active.  Returns the
    /// meta-policy and the external switch handle.
    pub fn new(
        policies: Vec<Box<dyn SchedulingPolicy>>,
    ) -> DispatchResult<(Self, PolicySwitch)> {
        if policies.is_empty() {
            return Err(DispatchError::NoPolicies);
        }
        let target = Arc::new(AtomicUsize::new(0));
        let handle = PolicySwitch { target: Arc::clone(&target), count: policies.len() };
        Ok((SwitchingPolicy { policies, active: 0, target }, handle))
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Switch immediately, for callers that still hold the policy directly.
    /// A switch to the already active index is a no-op; an actual change
    /// runs the incoming policy's `activated` hook.
    pub fn switch_to(&mut self, index: usize, ctx: &mut DispatchCtx<'_>) -> DispatchResult<()> {
        if index >= self.policies.len() {
            return Err(DispatchError::PolicyIndexOutOfRange {
                index,
                count: self.policies.len(),
            });
        }
        self.target.store(index, Ordering::Relaxed);
        self.apply_switch(ctx);
        Ok(())
    }

    fn apply_switch(&mut self, ctx: &mut DispatchCtx<'_>) {
        let want = self.target.load(Ordering::Relaxed);
        if want != self.active {
            self.active = want;
            info!("[{}] switched to policy \"{}\"", ctx.now(), self.policies[want].name());
            self.policies[want].activated(ctx);
        }
    }
}

impl SchedulingPolicy for SwitchingPolicy {
    fn name(&self) -> &'static str {
        self.policies[self.active].name()
    }

    fn passenger_arrived(&mut self, call: HallCall, ctx: &mut DispatchCtx<'_>) {
        self.policies[self.active].passenger_arrived(call, ctx);
    }

    fn passenger_boarded(
        &mut self,
        elevator: ElevatorId,
        passenger: PassengerId,
        ctx: &mut DispatchCtx<'_>,
    ) {
        self.policies[self.active].passenger_boarded(elevator, passenger, ctx);
    }

    fn passenger_exited(
        &mut self,
        elevator: ElevatorId,
        passenger: &Passenger,
        ctx: &mut DispatchCtx<'_>,
    ) {
        self.policies[self.active].passenger_exited(elevator, passenger, ctx);
    }

    fn on_idle(&mut self, elevator: ElevatorId, ctx: &mut DispatchCtx<'_>) {
        self.policies[self.active].on_idle(elevator, ctx);
    }

    fn on_turned(&mut self, elevator: ElevatorId, ctx: &mut DispatchCtx<'_>) {
        self.policies[self.active].on_turned(elevator, ctx);
    }

    fn activated(&mut self, ctx: &mut DispatchCtx<'_>) {
        self.policies[self.active].activated(ctx);
    }

    fn update(&mut self, ctx: &mut DispatchCtx<'_>) {
        // Pending external selections land here, before the tick's dispatch.
        self.apply_switch(ctx);
        self.policies[self.active].update(ctx);
    }
}
