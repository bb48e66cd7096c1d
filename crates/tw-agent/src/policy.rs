//! Spawn and despawn policy.
//!
//! - Inbound window: one queued arrival per free slot in every connected
//!   room of the kind's type, shuffled and released one every
//!   `spawn_interval_ticks`.
//! - Outbound window: every occupant of the kind resting in its room heads
//!   for the exit.
//! - Janitor: when none is active and a connected room is dirty enough, one
//!   is sent to the dirtiest room.

use tracing::{debug, info};

use tw_core::{OccupantKind, RoomId, RoomType, Tick};
use tw_schedule::{DailyWindow, SpawnOrder, WindowAction};
use tw_topology::Topology;

use crate::event::AgentEvent;
use crate::occupant::OccupantState;
use crate::simulation::AgentSimulation;

impl AgentSimulation {
    /// Act on the windows that fired this tick.
    pub fn apply_windows(&mut self, windows: &[DailyWindow], topology: &Topology, now: Tick) {
        for window in windows {
            match window.action {
                WindowAction::Inbound => self.enqueue_inbound(window.kind, topology, now),
                WindowAction::Outbound => self.send_home(window.kind),
            }
        }
    }

    fn enqueue_inbound(&mut self, kind: OccupantKind, topology: &Topology, now: Tick) {
        let Some(room_type) = kind.room_type() else {
            return;
        };
        let mut orders: Vec<SpawnOrder> = Vec::new();
        for room in topology.connected_rooms(room_type) {
            let taken = self.occupants.assigned_to(room.id()) + self.queue.pending_for(room.id());
            let free = room.capacity().saturating_sub(taken);
            orders.extend(std::iter::repeat_n(SpawnOrder { kind, room: room.id() }, free));
        }
        self.rng.shuffle(&mut orders);

        info!(%kind, count = orders.len(), "inbound arrivals queued");
        for (slot, order) in orders.into_iter().enumerate() {
            let at = self.now_plus(now, slot);
            self.queue.push(at, order);
        }
    }

    fn send_home(&mut self, kind: OccupantKind) {
        let mut count = 0;
        for occ in self.occupants.iter_mut() {
            if occ.kind == kind && occ.state == OccupantState::Arrived {
                occ.head_for_exit();
                count += 1;
            }
        }
        info!(%kind, count, "outbound window");
    }

    /// Spawn every queued arrival due by `now`.  Orders whose room is gone,
    /// disconnected, or full are dropped.
    pub fn release_spawns(&mut self, topology: &Topology, now: Tick, events: &mut Vec<AgentEvent>) {
        for order in self.queue.drain_due(now) {
            if let Err(e) = self.spawn(order.kind, order.room, topology, events) {
                debug!(kind = %order.kind, room = %order.room, error = %e, "queued arrival dropped");
            }
        }
    }

    /// Send a janitor to the dirtiest connected room at or above the dirt
    /// threshold, unless one is already on duty.
    pub fn dispatch_janitor(&mut self, topology: &Topology, events: &mut Vec<AgentEvent>) -> Option<RoomId> {
        if self.occupants.any_active(OccupantKind::Janitor) {
            return None;
        }
        let threshold = self.config.dirt_threshold;
        let target = topology
            .rooms()
            .filter(|r| r.connected() && r.transit().is_none() && r.kind() != RoomType::Lobby)
            .filter(|r| r.dirt >= threshold)
            .max_by(|a, b| a.dirt.total_cmp(&b.dirt).then(b.id().cmp(&a.id())))?
            .id();

        match self.spawn(OccupantKind::Janitor, target, topology, events) {
            Ok(_) => Some(target),
            Err(e) => {
                debug!(room = %target, error = %e, "janitor dispatch failed");
                None
            }
        }
    }
}
