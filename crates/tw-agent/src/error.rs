use thiserror::Error;

use tw_core::{OccupantId, OccupantKind, RoomId, RoomType};

/// No transit path exists between two floors.  Recovered locally: the
/// occupant leaves gracefully.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RoutingFailure {
    #[error("no path from floor {from} to floor {to}")]
    NoPath { from: i32, to: i32 },
}

/// Rejected external agent commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpawnError {
    #[error("room {0} does not exist")]
    UnknownRoom(RoomId),

    #[error("room {0} is not connected to the lobby")]
    NotConnected(RoomId),

    #[error("room {0} has no free capacity")]
    RoomFull(RoomId),

    #[error("{kind} cannot live in a {room_type} room")]
    WrongRoomType { kind: OccupantKind, room_type: RoomType },

    #[error("occupant {0} does not exist")]
    UnknownOccupant(OccupantId),
}
