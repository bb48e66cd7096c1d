use thiserror::Error;

use tw_agent::SpawnError;
use tw_core::ConfigError;
use tw_schedule::ScheduleError;
use tw_topology::PlacementError;

#[derive(Debug, Error)]
pub enum TowerError {
    #[error("tower configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("window table error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("initial layout rejected: {0}")]
    Placement(#[from] PlacementError),

    #[error("agent command rejected: {0}")]
    Spawn(#[from] SpawnError),
}

pub type TowerResult<T> = Result<T, TowerError>;
