//! Fluent builder for constructing a [`Tower`].

use tracing::info;

use tw_agent::AgentSimulation;
use tw_core::{ConfigError, GameClock, GridPos, GridSize, RoomType, SimRng};
use tw_schedule::WindowSchedule;
use tw_topology::Topology;
use tw_transit::TransitScheduler;

use crate::{Tower, TowerConfig, TowerEvent, TowerResult};

/// RNG stream ids split off the config seed.
pub(crate) const AGENT_STREAM: u64 = 1;
pub(crate) const SOIL_STREAM:  u64 = 2;

/// Fluent builder for [`Tower`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                   |
/// |-------------------|-------------------------------------------|
/// | `.windows(s)`     | `WindowSchedule::new(config.windows)`     |
/// | `.room(pos, ty)`  | no rooms besides the lobby floor          |
///
/// Rooms given to the builder are placed before the first tick without any
/// construction cost.
///
/// # Example
///
/// ```rust,ignore
/// let tower = TowerBuilder::new(TowerConfig::with_grid(20, 12, 2))
///     .room(GridPos::new(3, 2), RoomType::Elevator)
///     .room(GridPos::new(4, 3), RoomType::Office)
///     .build()?;
/// ```
pub struct TowerBuilder {
    config:  TowerConfig,
    windows: Option<WindowSchedule>,
    layout:  Vec<(GridPos, RoomType)>,
}

impl TowerBuilder {
    pub fn new(config: TowerConfig) -> Self {
        Self { config, windows: None, layout: Vec::new() }
    }

    /// Replace the config's window table.
    pub fn windows(mut self, windows: WindowSchedule) -> Self {
        self.windows = Some(windows);
        self
    }

    /// Place a room as part of the initial layout.
    pub fn room(mut self, origin: GridPos, kind: RoomType) -> Self {
        self.layout.push((origin, kind));
        self
    }

    /// A vertical run of single-cell rooms (a shaft or stairwell) in
    /// `column` from `bottom` to `top` inclusive.
    pub fn column(mut self, column: i32, bottom: i32, top: i32, kind: RoomType) -> Self {
        self.layout
            .extend((bottom..=top).map(|floor| (GridPos::new(column, floor), kind)));
        self
    }

    /// Validate the config, place the initial layout, and return a tower
    /// whose connectivity and car set are already current.
    pub fn build(self) -> TowerResult<Tower> {
        let config = self.config;
        validate(&config)?;

        let windows = match self.windows {
            Some(w) => w,
            None => WindowSchedule::new(config.windows.clone())?,
        };

        let mut topology = Topology::new(
            GridSize::new(config.width, config.height),
            config.lobby_floor,
            config.catalog.clone(),
        )?;

        let mut events = Vec::with_capacity(self.layout.len());
        for (origin, kind) in self.layout {
            let room = topology.place(origin, kind)?;
            events.push(TowerEvent::RoomBuilt { room, kind, origin });
        }
        topology.recompute_connectivity();

        let mut transit = TransitScheduler::new(config.transit.clone());
        let mut transit_events = Vec::new();
        transit.resync(&topology, &mut transit_events);
        events.extend(transit_events.iter().filter_map(TowerEvent::from_transit));

        let mut root = SimRng::new(config.seed);
        let agents = AgentSimulation::new(config.agent.clone(), root.child(AGENT_STREAM));
        let soil_rng = root.child(SOIL_STREAM);

        info!(
            width = config.width,
            height = config.height,
            lobby = config.lobby_floor,
            rooms = topology.room_count(),
            cars = transit.len(),
            "tower built"
        );

        Ok(Tower {
            clock: GameClock::new(config.clock.clone()),
            config,
            topology,
            transit,
            agents,
            windows,
            soil_rng,
            events,
            population: 0,
        })
    }
}

fn validate(config: &TowerConfig) -> Result<(), ConfigError> {
    if !config.catalog.contains(RoomType::Lobby) {
        return Err(ConfigError::UnknownRoomType(RoomType::Lobby));
    }
    if config.agent.walk_speed <= 0.0 || config.agent.stair_speed <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "walk and stair speeds must be positive, got {} and {}",
            config.agent.walk_speed, config.agent.stair_speed
        )));
    }
    if config.transit.dwell_ticks == 0 {
        return Err(ConfigError::Invalid("dwell_ticks must be at least 1".into()));
    }
    if config.clock.minutes_per_delta < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "minutes_per_delta must not be negative, got {}",
            config.clock.minutes_per_delta
        )));
    }
    Ok(())
}
