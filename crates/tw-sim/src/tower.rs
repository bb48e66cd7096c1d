//! The `Tower` struct and its tick loop.

use tracing::{debug, info};

use tw_agent::{AgentContext, AgentEvent, AgentSimulation};
use tw_core::{GameClock, GridPos, OccupantId, OccupantKind, RoomId, RoomType, SimRng, Speed, Tick};
use tw_schedule::WindowSchedule;
use tw_topology::{CellSnapshot, DemolitionError, PlacementResult, Topology};
use tw_transit::{CarSnapshot, TransitEvent, TransitScheduler};

use crate::{EconomicEvent, TowerConfig, TowerEvent, TowerObserver, TowerResult};

/// Room → occupants resting there, rebuilt every tick.
#[cfg(feature = "fx-hash")]
type RoomIndex = rustc_hash::FxHashMap<RoomId, (Vec<OccupantId>, f32)>;
#[cfg(not(feature = "fx-hash"))]
type RoomIndex = std::collections::HashMap<RoomId, (Vec<OccupantId>, f32)>;

/// Upper bound on start-of-day work done by a single tick.
pub const MAX_REPLAYED_DAYS: u32 = 7;

// ── TickReport ────────────────────────────────────────────────────────────────

/// What one call to [`Tower::tick`] did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick counter after the step.
    pub tick: Tick,
    /// The tower was paused; nothing moved.
    pub paused: bool,
    pub day_rolled_over: bool,
    /// Midnight wraps this step (more than one only for huge deltas).
    pub rollovers: u32,
    /// Events appended to the pending queue by this step.
    pub events: usize,
    pub population: usize,
}

// ── Tower ─────────────────────────────────────────────────────────────────────

/// The whole simulated building.
///
/// Collaborators issue build/demolish/tick commands and read snapshots and
/// the event queue; nothing else reaches into the subsystems.
///
/// Create via [`TowerBuilder`][crate::TowerBuilder].
pub struct Tower {
    pub(crate) config:     TowerConfig,
    pub(crate) clock:      GameClock,
    pub(crate) topology:   Topology,
    pub(crate) transit:    TransitScheduler,
    pub(crate) agents:     AgentSimulation,
    pub(crate) windows:    WindowSchedule,
    /// Daily soiling draws from its own stream so spawn order does not
    /// shift it.
    pub(crate) soil_rng:   SimRng,
    /// Pending notifications, oldest first.
    pub(crate) events:     Vec<TowerEvent>,
    pub(crate) population: usize,
}

impl Tower {
    // ── Structure ─────────────────────────────────────────────────────────

    /// Place a room.  Connectivity is refreshed at the start of the next
    /// tick.
    pub fn build(&mut self, origin: GridPos, kind: RoomType) -> PlacementResult<RoomId> {
        let cost = self.topology.catalog().spec(kind)?.cost;
        let room = self.topology.place(origin, kind)?;
        info!(%room, %kind, %origin, cost, "room built");
        self.events.push(TowerEvent::RoomBuilt { room, kind, origin });
        self.events.push(TowerEvent::Economic(EconomicEvent::Construction { room, kind, cost }));
        Ok(room)
    }

    /// Remove the room covering `pos`.  Queued arrivals for it are dropped
    /// and anyone headed there turns around on their next step.
    pub fn demolish(&mut self, pos: GridPos) -> Result<RoomId, DemolitionError> {
        let room = self.topology.remove(pos)?;
        self.agents.forget_room(room.id());
        info!(room = %room.id(), kind = %room.kind(), origin = %room.origin(), "room demolished");
        self.events.push(TowerEvent::RoomDemolished {
            room: room.id(),
            kind: room.kind(),
            origin: room.origin(),
        });
        Ok(room.id())
    }

    /// Reset the dirt of the room covering `pos`.
    pub fn clean(&mut self, pos: GridPos) -> bool {
        self.topology.clean(pos)
    }

    // ── Agent commands ────────────────────────────────────────────────────

    pub fn spawn_occupant(&mut self, kind: OccupantKind, room: RoomId) -> TowerResult<OccupantId> {
        let mut events = Vec::new();
        let id = self.agents.spawn(kind, room, &self.topology, &mut events)?;
        self.events.extend(events.iter().map(TowerEvent::from));
        self.population = self.agents.population();
        Ok(id)
    }

    pub fn send_to_exit(&mut self, id: OccupantId) -> TowerResult<()> {
        self.agents.send_to_exit(id)?;
        Ok(())
    }

    // ── Clock control ─────────────────────────────────────────────────────

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.clock.set_speed(speed);
    }

    pub fn cycle_speed(&mut self) -> Speed {
        self.clock.cycle_speed()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &TowerConfig {
        &self.config
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn transit(&self) -> &TransitScheduler {
        &self.transit
    }

    pub fn agents(&self) -> &AgentSimulation {
        &self.agents
    }

    pub fn query_cell(&self, pos: GridPos) -> Option<CellSnapshot> {
        self.topology.cell(pos)
    }

    /// One snapshot per car, in column order.
    pub fn query_cars(&self) -> Vec<CarSnapshot> {
        self.transit.snapshots()
    }

    /// Occupants inside the building as of the last tick or command.
    pub fn population(&self) -> usize {
        self.population
    }

    /// Events not yet drained.
    pub fn pending_events(&self) -> &[TowerEvent] {
        &self.events
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&mut self) -> Vec<TowerEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run `n` ticks of `delta` each, reporting to `observer`.
    pub fn run_ticks<O: TowerObserver>(&mut self, n: u64, delta: f64, observer: &mut O) {
        for _ in 0..n {
            observer.on_tick_start(self.clock.tick());
            let report = self.tick(delta);
            if report.events > 0 {
                let from = self.events.len() - report.events;
                observer.on_events(report.tick, &self.events[from..]);
            }
            observer.on_tick_end(self, &report);
        }
        observer.on_run_end(self.clock.tick());
    }

    /// Advance the whole building by one step of `delta`.  Never fails:
    /// inconsistencies left by structural changes heal in the resync phase.
    pub fn tick(&mut self, delta: f64) -> TickReport {
        if self.clock.is_paused() {
            return TickReport {
                tick: self.clock.tick(),
                paused: true,
                population: self.population,
                ..TickReport::default()
            };
        }
        let mark = self.events.len();

        // ── ① Clock ───────────────────────────────────────────────────────
        let step = self.clock.advance(delta);
        let now = self.clock.tick();
        let motion = self.clock.motion_scale(delta);

        // ── ② Connectivity, only after a structural change ────────────────
        if self.topology.is_dirty() {
            self.refresh_connectivity();
        }

        // ── ③ Car set against current shafts ──────────────────────────────
        let mut transit_events = Vec::new();
        self.transit.resync(&self.topology, &mut transit_events);
        self.absorb_transit(&transit_events);

        // ── ④ Day rollover ────────────────────────────────────────────────
        // Only the most recent days are replayed after an oversized delta.
        let replayed = step.rollovers.min(MAX_REPLAYED_DAYS);
        for back in (0..replayed).rev() {
            self.start_day(self.clock.day().saturating_sub(back));
        }

        // ── ⑤ Spawn / despawn policy ──────────────────────────────────────
        let mut agent_events: Vec<AgentEvent> = Vec::new();
        let fired = self.windows.due(self.clock.minute());
        if !fired.is_empty() {
            self.agents.apply_windows(&fired, &self.topology, now);
        }
        self.agents.release_spawns(&self.topology, now, &mut agent_events);
        if let Some(room) = self.agents.dispatch_janitor(&self.topology, &mut agent_events) {
            debug!(%room, "janitor dispatched");
        }

        // ── ⑥ Occupant state machines ─────────────────────────────────────
        let requests = {
            let ctx = AgentContext::new(&self.topology, &self.transit, motion, now);
            self.agents.step(&ctx, &mut agent_events)
        };

        // ── ⑦ Cars and passenger exchange ─────────────────────────────────
        self.transit.register(requests);
        let mut transit_events = Vec::new();
        self.transit.advance(motion, &mut transit_events);
        self.absorb_transit(&transit_events);
        self.agents.sync_riders(&self.transit);

        // ── ⑧ Derived metrics ─────────────────────────────────────────────
        self.settle_arrivals(&agent_events);
        self.events.extend(agent_events.iter().map(TowerEvent::from));
        self.agents.purge();
        self.update_metrics();

        TickReport {
            tick: now,
            paused: false,
            day_rolled_over: step.day_rolled_over(),
            rollovers: step.rollovers,
            events: self.events.len() - mark,
            population: self.population,
        }
    }

    // ── Phases ────────────────────────────────────────────────────────────

    fn refresh_connectivity(&mut self) {
        let report = self.topology.recompute_connectivity();
        if report.changed > 0 {
            self.events.push(TowerEvent::ConnectivityChanged {
                connected: report.connected,
                disconnected: report.disconnected,
            });
        }
    }

    /// Hand ride events to the agents and surface the car-level ones.
    fn absorb_transit(&mut self, events: &[TransitEvent]) {
        self.agents.apply_transit(events);
        self.events.extend(events.iter().filter_map(TowerEvent::from_transit));
    }

    /// Rebuild per-room occupant lists and mean stress, and the population.
    fn update_metrics(&mut self) {
        let mut resting = RoomIndex::default();
        for occ in self.agents.occupants().iter() {
            if let Some(room) = occ.goal_room().filter(|r| occ.is_resting_in(*r)) {
                let entry = resting.entry(room).or_insert_with(|| (Vec::new(), 0.0));
                entry.0.push(occ.id);
                entry.1 += occ.stress;
            }
        }
        for room in self.topology.rooms_mut() {
            match resting.remove(&room.id()) {
                Some((ids, total)) => {
                    room.stress = total / ids.len() as f32;
                    room.occupants = ids;
                }
                None => {
                    room.stress = 0.0;
                    room.occupants.clear();
                }
            }
        }
        self.population = self.agents.population();
    }
}
