//! Messages exchanged between the scheduler and the agent subsystem.

use tw_core::{CarId, OccupantId, RoomType};

use crate::car::Direction;

/// An occupant waiting at `floor` of a shaft asks `car` to take it to
/// `destination`.  Agents re-register every tick they keep waiting.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RideRequest {
    pub occupant:    OccupantId,
    pub car:         CarId,
    pub floor:       i32,
    pub destination: i32,
    /// Whether the occupant is staff (the only role service cars admit).
    pub staff:       bool,
}

/// Things the scheduler did this tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitEvent {
    CarAdded { car: CarId, column: i32, kind: RoomType },
    /// The shaft disappeared; `evicted` passengers were put off first.
    CarRemoved { car: CarId, column: i32, evicted: usize },
    /// Doors opened at `floor`.
    Arrived { car: CarId, column: i32, floor: i32 },
    Boarded { occupant: OccupantId, car: CarId, column: i32, floor: i32 },
    /// The occupant is off the car and standing at `(column, floor)`.
    Disembarked { occupant: OccupantId, car: CarId, column: i32, floor: i32 },
}

/// Read-only view of one car.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarSnapshot {
    pub id:         CarId,
    pub shaft_x:    i32,
    pub kind:       RoomType,
    pub position:   f64,
    pub direction:  Direction,
    pub doors_open: bool,
    pub load:       usize,
    pub capacity:   usize,
    pub pending:    Vec<i32>,
}
