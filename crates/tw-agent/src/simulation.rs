//! `AgentSimulation`: owns the occupants and applies everything that
//! happens to them.

use tracing::{debug, info};

use tw_core::{OccupantId, OccupantKind, RoomId, SimRng, Tick};
use tw_schedule::SpawnQueue;
use tw_topology::Topology;
use tw_transit::{RideRequest, TransitEvent, TransitScheduler};

use crate::config::AgentConfig;
use crate::context::AgentContext;
use crate::error::SpawnError;
use crate::event::AgentEvent;
use crate::fsm;
use crate::occupant::{Goal, Leg, Occupant, OccupantState};
use crate::store::OccupantStore;

pub struct AgentSimulation {
    pub(crate) config:    AgentConfig,
    pub(crate) occupants: OccupantStore,
    pub(crate) queue:     SpawnQueue,
    pub(crate) rng:       SimRng,
}

impl AgentSimulation {
    pub fn new(config: AgentConfig, rng: SimRng) -> Self {
        Self {
            config,
            occupants: OccupantStore::new(),
            queue: SpawnQueue::new(),
            rng,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn occupants(&self) -> &OccupantStore {
        &self.occupants
    }

    pub fn occupant(&self, id: OccupantId) -> Option<&Occupant> {
        self.occupants.get(id)
    }

    /// Occupants currently in the building (not yet purged).
    pub fn population(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_active()).count()
    }

    /// Arrivals queued but not yet released.
    pub fn queued_spawns(&self) -> usize {
        self.queue.len()
    }

    // ── External commands ─────────────────────────────────────────────────

    /// Create an occupant of `kind` at the lobby entrance, headed for `room`.
    ///
    /// Non-staff occupants must match the room type and need a free slot.
    pub fn spawn(
        &mut self,
        kind: OccupantKind,
        room: RoomId,
        topology: &Topology,
        events: &mut Vec<AgentEvent>,
    ) -> Result<OccupantId, SpawnError> {
        let target = topology.room(room).ok_or(SpawnError::UnknownRoom(room))?;
        if !target.connected() {
            return Err(SpawnError::NotConnected(room));
        }

        let home = match kind.room_type() {
            Some(room_type) if room_type != target.kind() => {
                return Err(SpawnError::WrongRoomType { kind, room_type: target.kind() });
            }
            Some(_) => {
                if self.occupants.assigned_to(room) >= target.capacity() {
                    return Err(SpawnError::RoomFull(room));
                }
                Some(room)
            }
            None => None,
        };

        let goal = Goal::Room { room, x: target.center_x(), floor: target.floor() };
        let id = self.occupants.allocate_id();
        let entrance = (0.0, topology.lobby_floor());
        self.occupants.insert(Occupant::new(id, kind, entrance, goal, home, self.config.patience));

        debug!(occupant = %id, %kind, %room, "occupant spawned");
        events.push(AgentEvent::Spawned { occupant: id, kind, room });
        Ok(id)
    }

    /// Give `id` a return-to-entrance goal.
    pub fn send_to_exit(&mut self, id: OccupantId) -> Result<(), SpawnError> {
        let occ = self.occupants.get_mut(id).ok_or(SpawnError::UnknownOccupant(id))?;
        occ.head_for_exit();
        Ok(())
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Run every occupant's state machine once.  Returns this tick's ride
    /// requests for the scheduler.
    pub fn step(&mut self, ctx: &AgentContext<'_>, events: &mut Vec<AgentEvent>) -> Vec<RideRequest> {
        let mut requests = Vec::new();
        let config = &self.config;
        for occ in self.occupants.iter_mut() {
            fsm::advance(occ, config, ctx, &mut requests, events);
        }
        requests
    }

    /// Apply the scheduler's events to occupant records.
    pub fn apply_transit(&mut self, events: &[TransitEvent]) {
        for event in events {
            match *event {
                TransitEvent::Boarded { occupant, car, .. } => {
                    if let Some(occ) = self.occupants.get_mut(occupant) {
                        occ.state = OccupantState::Riding;
                        occ.car = Some(car);
                        occ.wait_ticks = 0;
                    }
                }
                TransitEvent::Disembarked { occupant, column, floor, .. } => {
                    if let Some(occ) = self.occupants.get_mut(occupant) {
                        occ.car = None;
                        occ.leg = None;
                        occ.x = column as f64;
                        occ.y = floor as f64;
                        occ.state = OccupantState::SeekingTransport;
                    }
                }
                TransitEvent::CarRemoved { car, .. } => {
                    for occ in self.occupants.iter_mut() {
                        let uses_car = matches!(occ.leg, Some(Leg::Car { car: c, .. }) if c == car);
                        if uses_car && occ.state != OccupantState::Riding {
                            occ.leg = None;
                            occ.wait_ticks = 0;
                            occ.state = OccupantState::SeekingTransport;
                        }
                    }
                }
                TransitEvent::CarAdded { .. } | TransitEvent::Arrived { .. } => {}
            }
        }
    }

    /// Copy car positions onto riding occupants.
    pub fn sync_riders(&mut self, transit: &TransitScheduler) {
        for occ in self.occupants.iter_mut() {
            if occ.state != OccupantState::Riding {
                continue;
            }
            if let Some(car) = occ.car.and_then(|id| transit.car(id)) {
                occ.x = car.column() as f64;
                occ.y = car.position();
            }
        }
    }

    /// Remove despawned occupants.
    pub fn purge(&mut self) -> Vec<OccupantId> {
        let removed = self.occupants.purge();
        if !removed.is_empty() {
            info!(count = removed.len(), "occupants left the building");
        }
        removed
    }

    /// Drop queued arrivals for a room that no longer exists.
    pub fn forget_room(&mut self, room: RoomId) {
        let dropped = self.queue.cancel_room(room);
        if dropped > 0 {
            debug!(%room, dropped, "queued arrivals cancelled");
        }
    }

    pub(crate) fn now_plus(&self, now: Tick, slot: usize) -> Tick {
        now.offset(slot as u64 * self.config.spawn_interval_ticks)
    }
}
