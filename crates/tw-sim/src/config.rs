//! `TowerConfig`: everything the tower needs at initialization.

use tw_agent::AgentConfig;
use tw_core::{Catalog, ClockConfig};
use tw_schedule::{DailyWindow, WindowSchedule};
use tw_transit::TransitConfig;

/// Immutable once handed to [`TowerBuilder`](crate::TowerBuilder).
///
/// With the `serde` feature every field is optional in serialized form;
/// missing fields take their defaults.  Note that the default `catalog` is
/// the standard one for the default grid: a config that changes `height` or
/// `lobby_floor` should also supply a catalog, or be built with
/// [`TowerConfig::with_grid`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TowerConfig {
    /// Grid width in cells.  Default: 40.
    pub width: u32,
    /// Grid height in floors.  Default: 50.
    pub height: u32,
    /// Default: 25.
    pub lobby_floor: i32,
    /// Seed for every stochastic choice (spawn order, daily soiling).
    pub seed: u64,
    pub catalog: Catalog,
    pub clock: ClockConfig,
    pub transit: TransitConfig,
    pub agent: AgentConfig,
    /// The daily inbound/outbound table.
    pub windows: Vec<DailyWindow>,
    /// Dirt added to a room per non-staff arrival.
    pub dirt_per_visit: f32,
    /// Dirt added to one random room at each day rollover.
    pub daily_soiling: f32,
}

impl TowerConfig {
    /// Defaults with the given grid and the standard catalog for it.
    pub fn with_grid(width: u32, height: u32, lobby_floor: i32) -> Self {
        Self {
            width,
            height,
            lobby_floor,
            catalog: Catalog::standard(lobby_floor, height),
            ..Self::default()
        }
    }
}

impl Default for TowerConfig {
    fn default() -> Self {
        let (width, height, lobby_floor) = (40, 50, 25);
        Self {
            width,
            height,
            lobby_floor,
            seed:           0,
            catalog:        Catalog::standard(lobby_floor, height),
            clock:          ClockConfig::default(),
            transit:        TransitConfig::default(),
            agent:          AgentConfig::default(),
            windows:        WindowSchedule::standard().windows().to_vec(),
            dirt_per_visit: 2.0,
            daily_soiling:  20.0,
        }
    }
}
