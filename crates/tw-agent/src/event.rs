use tw_core::{OccupantId, OccupantKind, RoomId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GaveUpReason {
    /// Routing found no path to the goal.
    NoRoute,
    /// Patience ran out waiting for a car.
    Impatient,
}

/// Occupant lifecycle notifications.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentEvent {
    Spawned { occupant: OccupantId, kind: OccupantKind, room: RoomId },
    Arrived { occupant: OccupantId, kind: OccupantKind, room: RoomId },
    GaveUp { occupant: OccupantId, kind: OccupantKind, reason: GaveUpReason },
    /// Walked out past the building boundary and was removed.
    Departed { occupant: OccupantId, kind: OccupantKind },
}
