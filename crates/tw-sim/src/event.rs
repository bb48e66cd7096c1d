//! Notifications emitted by the tower for external collaborators
//! (presentation, sound, finance).  Drained with
//! [`Tower::drain_events`](crate::Tower::drain_events).

use tw_agent::{AgentEvent, GaveUpReason};
use tw_core::{CarId, GridPos, OccupantId, OccupantKind, RoomId, RoomType};
use tw_transit::TransitEvent;

/// Money flows, consumed by an external finance layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EconomicEvent {
    /// Build cost of a newly placed room.
    Construction { room: RoomId, kind: RoomType, cost: u32 },
    /// Daily rent at rollover.
    Rent { room: RoomId, kind: RoomType, amount: u32 },
    /// One-time condo sale on the first resident arrival.
    Sale { room: RoomId, amount: u32 },
    /// Per-visit income.
    Income { room: RoomId, kind: RoomType, amount: u32 },
}

impl EconomicEvent {
    /// Signed effect on the building's cash.
    pub fn amount(&self) -> i64 {
        match *self {
            EconomicEvent::Construction { cost, .. } => -(cost as i64),
            EconomicEvent::Rent { amount, .. }
            | EconomicEvent::Sale { amount, .. }
            | EconomicEvent::Income { amount, .. } => amount as i64,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TowerEvent {
    RoomBuilt { room: RoomId, kind: RoomType, origin: GridPos },
    RoomDemolished { room: RoomId, kind: RoomType, origin: GridPos },
    /// A connectivity pass flipped at least one room.
    ConnectivityChanged { connected: usize, disconnected: usize },
    CarAdded { car: CarId, column: i32, kind: RoomType },
    CarRemoved { car: CarId, column: i32, evicted: usize },
    CarArrived { car: CarId, column: i32, floor: i32 },
    OccupantSpawned { occupant: OccupantId, kind: OccupantKind, room: RoomId },
    OccupantArrived { occupant: OccupantId, kind: OccupantKind, room: RoomId },
    OccupantGaveUp { occupant: OccupantId, kind: OccupantKind, reason: GaveUpReason },
    OccupantDeparted { occupant: OccupantId, kind: OccupantKind },
    DayStarted { day: u32 },
    Economic(EconomicEvent),
}

impl TowerEvent {
    /// Ride exchanges stay internal to the agent/transit hand-off.
    pub(crate) fn from_transit(event: &TransitEvent) -> Option<Self> {
        match *event {
            TransitEvent::CarAdded { car, column, kind } => Some(TowerEvent::CarAdded { car, column, kind }),
            TransitEvent::CarRemoved { car, column, evicted } => {
                Some(TowerEvent::CarRemoved { car, column, evicted })
            }
            TransitEvent::Arrived { car, column, floor } => Some(TowerEvent::CarArrived { car, column, floor }),
            TransitEvent::Boarded { .. } | TransitEvent::Disembarked { .. } => None,
        }
    }
}

impl From<&AgentEvent> for TowerEvent {
    fn from(event: &AgentEvent) -> Self {
        match *event {
            AgentEvent::Spawned { occupant, kind, room } => TowerEvent::OccupantSpawned { occupant, kind, room },
            AgentEvent::Arrived { occupant, kind, room } => TowerEvent::OccupantArrived { occupant, kind, room },
            AgentEvent::GaveUp { occupant, kind, reason } => TowerEvent::OccupantGaveUp { occupant, kind, reason },
            AgentEvent::Departed { occupant, kind } => TowerEvent::OccupantDeparted { occupant, kind },
        }
    }
}
