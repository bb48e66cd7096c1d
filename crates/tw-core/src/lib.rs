//! `tw-core`: foundational types for the `rust_tower` simulation.
//!
//! This crate is a dependency of every other `tw-*` crate.  It has no
//! `tw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `RoomId`, `OccupantId`, `CarId`                       |
//! | [`grid`]        | `GridPos`, `GridSize`                                 |
//! | [`time`]        | `Tick`, `GameClock`, `ClockConfig`, `Speed`           |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`catalog`]     | `RoomType`, `RoomSpec`, `TransitSpec`, `Zone`, `Catalog` |
//! | [`kind`]        | `OccupantKind`                                        |
//! | [`error`]       | `ConfigError`, `ConfigResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod catalog;
pub mod error;
pub mod grid;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use catalog::{Catalog, Income, PlacementRule, RoomSpec, RoomType, TransitKind, TransitSpec, Zone};
pub use error::{ConfigError, ConfigResult};
pub use grid::{GridPos, GridSize};
pub use ids::{CarId, OccupantId, RoomId};
pub use kind::OccupantKind;
pub use rng::SimRng;
pub use time::{ClockConfig, ClockStep, GameClock, MINUTES_PER_DAY, Speed, Tick};
