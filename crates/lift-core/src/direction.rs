//! Travel direction shared by cars, hall calls, and dispatch policies.

use crate::FloorId;

/// The direction a car is committed to, or a passenger needs to travel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// No commitment: an idle car, or a degenerate same-floor comparison.
    #[default]
    None,
    Up,
    Down,
}

impl Direction {
    /// Direction of travel from `from` to `to`.  Equal floors give `None`.
    #[inline]
    pub fn between(from: FloorId, to: FloorId) -> Direction {
        use std::cmp::Ordering::*;
        match from.0.cmp(&to.0) {
            Less => Direction::Up,
            Greater => Direction::Down,
            Equal => Direction::None,
        }
    }

    /// The opposite commitment.  `None` stays `None`.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::None => Direction::None,
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        matches!(self, Direction::None)
    }

    /// Human-readable label, useful for log lines and CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::None => "none",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
