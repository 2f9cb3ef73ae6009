//! Passenger records and the hall-side view the dispatcher works from.
//!
//! A `Passenger` is owned by exactly one container at a time: the generating
//! floor's waiting queue until boarding, then a car's manifest until exit.
//! The control system never owns passengers; it tracks them through copyable
//! [`HallCall`] records keyed by ID.

use crate::{Direction, FloorId, PassengerId, SimTime};

// ── Passenger ─────────────────────────────────────────────────────────────────

/// One arrival event and its travel request.
///
/// Immutable after creation except for two explicitly recorded facts: the
/// boarding timestamp, and a zone re-route.  Re-routing clips `destination`
/// to a zone boundary but keeps the original request in
/// `original_destination`, so the trip history stays inspectable instead of
/// being destructively overwritten.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passenger {
    id: PassengerId,
    arrival_floor: FloorId,
    destination: FloorId,
    original_destination: FloorId,
    weight: u32,
    created_at: SimTime,
    boarded_at: Option<SimTime>,
}

impl Passenger {
    /// A fresh arrival at `arrival_floor` heading to `destination`.
    ///
    /// `weight` is the capacity the passenger consumes aboard a car
    /// (1 for a single rider; luggage-heavy scenarios may use more).
    pub fn new(
        id: PassengerId,
        arrival_floor: FloorId,
        destination: FloorId,
        weight: u32,
        created_at: SimTime,
    ) -> Self {
        debug_assert_ne!(
            arrival_floor, destination,
            "a passenger never travels to its own floor"
        );
        Self {
            id,
            arrival_floor,
            destination,
            original_destination: destination,
            weight,
            created_at,
            boarded_at: None,
        }
    }

    #[inline]
    pub fn id(&self) -> PassengerId {
        self.id
    }

    #[inline]
    pub fn arrival_floor(&self) -> FloorId {
        self.arrival_floor
    }

    /// Where the passenger currently rides to (possibly a clipped boundary).
    #[inline]
    pub fn destination(&self) -> FloorId {
        self.destination
    }

    /// The originally requested floor, unaffected by re-routing.
    #[inline]
    pub fn original_destination(&self) -> FloorId {
        self.original_destination
    }

    #[inline]
    pub fn weight(&self) -> u32 {
        self.weight
    }

    #[inline]
    pub fn created_at(&self) -> SimTime {
        self.created_at
    }

    /// When the passenger boarded a car, if it has.
    #[inline]
    pub fn boarded_at(&self) -> Option<SimTime> {
        self.boarded_at
    }

    /// Required travel direction from the arrival floor.
    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::between(self.arrival_floor, self.destination)
    }

    /// Record the boarding instant.  Called once by the admitting car.
    pub fn record_boarding(&mut self, at: SimTime) {
        debug_assert!(self.boarded_at.is_none(), "{} boarded twice", self.id);
        self.boarded_at = Some(at);
    }

    /// Clip the trip to `boundary`, remembering the original request.
    pub fn reroute_to(&mut self, boundary: FloorId) {
        debug_assert_ne!(
            boundary, self.arrival_floor,
            "re-route target must differ from the arrival floor"
        );
        self.destination = boundary;
    }

    /// `true` once a zone policy has clipped the destination.
    #[inline]
    pub fn is_rerouted(&self) -> bool {
        self.destination != self.original_destination
    }
}

// ── HallCall ──────────────────────────────────────────────────────────────────

/// Lightweight hall-side copy of a waiting passenger.
///
/// Safe to hold and iterate while the passenger itself sits in a floor
/// queue; policies read these instead of borrowing into the building.
#[derive(Copy, Clone, Debug)]
pub struct HallCall {
    pub passenger: PassengerId,
    pub floor: FloorId,
    pub destination: FloorId,
    pub weight: u32,
    pub placed_at: SimTime,
}

impl HallCall {
    pub fn of(p: &Passenger) -> HallCall {
        HallCall {
            passenger: p.id(),
            floor: p.arrival_floor(),
            destination: p.destination(),
            weight: p.weight(),
            placed_at: p.created_at(),
        }
    }

    /// Required travel direction of the waiting passenger.
    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::between(self.floor, self.destination)
    }
}
