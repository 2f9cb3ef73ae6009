//! Named policy construction, the piece config files and CLIs talk to.

use crate::collective::CollectiveControl;
use crate::high_zoning::HighZoning;
use crate::longest_queue::LongestQueueFirst;
use crate::policy::SchedulingPolicy;
use crate::round_robin::RoundRobin;
use crate::zoning::Zoning;
use crate::DispatchResult;

/// Every concrete policy, with its construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PolicyKind {
    CollectiveControl,
    LongestQueueFirst,
    RoundRobin,
    RoundRobinUpPeak,
    Zoning { zones: usize },
    HighZoning { zones: usize },
}

impl PolicyKind {
    /// Build the policy for a building of `floors` floors and `cars` cars.
    /// Zone variants validate their split here, at construction.
    pub fn build(self, floors: usize, cars: usize) -> DispatchResult<Box<dyn SchedulingPolicy>> {
        Ok(match self {
            PolicyKind::CollectiveControl => Box::new(CollectiveControl::new()),
            PolicyKind::LongestQueueFirst => Box::new(LongestQueueFirst::new()),
            PolicyKind::RoundRobin => Box::new(RoundRobin::new(cars)),
            PolicyKind::RoundRobinUpPeak => Box::new(RoundRobin::up_peak(cars)),
            PolicyKind::Zoning { zones } => Box::new(Zoning::new(floors, cars, zones)?),
            PolicyKind::HighZoning { zones } => Box::new(HighZoning::new(floors, cars, zones)?),
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::CollectiveControl => "collective",
            PolicyKind::LongestQueueFirst => "longest-queue",
            PolicyKind::RoundRobin => "round-robin",
            PolicyKind::RoundRobinUpPeak => "round-robin-up-peak",
            PolicyKind::Zoning { .. } => "zoning",
            PolicyKind::HighZoning { .. } => "high-zoning",
        }
    }
}
