//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into the building's `Vec`s via `id.0 as usize`, but
//! callers should prefer the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID": the inner integer's MAX value.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Sequential passenger identity, unique within one simulation run.
    /// `u64` because a long run at high arrival rates outgrows `u32`.
    pub struct PassengerId(u64);
}

typed_id! {
    /// Index of a car in the building's elevator bank.
    pub struct ElevatorId(u32);
}

typed_id! {
    /// Floor number, counted from the lobby (floor 0) upward.
    pub struct FloorId(u32);
}

impl FloorId {
    /// Lobby floor, the ground level every building has.
    pub const LOBBY: FloorId = FloorId(0);

    /// Absolute floor distance between two floors.
    #[inline]
    pub fn distance(self, other: FloorId) -> u32 {
        self.0.abs_diff(other.0)
    }
}

// ── IdAllocator ───────────────────────────────────────────────────────────────

/// Hands out sequential `PassengerId`s.
///
/// One allocator per simulation run; both the stochastic generators and the
/// replay schedule draw from it so IDs stay globally unique and dense.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next unused ID.  Never returns the same value twice between resets.
    #[inline]
    pub fn next(&mut self) -> PassengerId {
        let id = PassengerId(self.next);
        self.next += 1;
        id
    }

    /// Start numbering from zero again (fresh run after a reset).
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
