//! Topology error types.

use thiserror::Error;

use tw_core::{ConfigError, GridPos, RoomType};

/// Why a room could not be placed.  A failed placement never modifies the
/// grid.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlacementError {
    #[error("a {width}-cell footprint at {origin} leaves the grid")]
    OutOfBounds { origin: GridPos, width: u32 },

    #[error("cell {at} is already occupied")]
    FootprintOccupied { at: GridPos },

    #[error("{kind} may not be placed on floor {floor}")]
    Zoning { kind: RoomType, floor: i32 },

    #[error(transparent)]
    Catalog(#[from] ConfigError),
}

/// Why a room could not be removed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DemolitionError {
    #[error("position {at} is outside the grid")]
    OutOfBounds { at: GridPos },

    #[error("nothing to demolish at {at}")]
    Empty { at: GridPos },

    #[error("{kind} at {at} is protected")]
    Protected { kind: RoomType, at: GridPos },

    #[error(transparent)]
    Catalog(#[from] ConfigError),
}

pub type PlacementResult<T> = Result<T, PlacementError>;
