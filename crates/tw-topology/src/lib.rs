//! `tw-topology`: the building grid.
//!
//! Rooms live in an arena ([`RoomArena`]) and the grid is a flat index of
//! `Option<RoomId>`, one entry per cell.  Every cell of a room's footprint
//! points at the same arena slot, so there is no anchor/placeholder
//! distinction to keep consistent: placement and removal write or clear the
//! whole footprint in one step.
//!
//! # Crate layout
//!
//! | Module           | Contents                                               |
//! |------------------|--------------------------------------------------------|
//! | [`room`]         | `Room`, `RoomArena`                                    |
//! | [`store`]        | `Topology`, `CellSnapshot`                             |
//! | [`placement`]    | `check_placement`, `can_place`, `place`, `remove`      |
//! | [`connectivity`] | lobby flood fill, `ConnectivityReport`                 |
//! | [`shaft`]        | `Shaft` detection for the transit scheduler            |
//! | [`error`]        | `PlacementError`, `DemolitionError`                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on snapshot types.         |

pub mod connectivity;
pub mod error;
pub mod placement;
pub mod room;
pub mod shaft;
pub mod store;


pub use connectivity::ConnectivityReport;
pub use error::{DemolitionError, PlacementError, PlacementResult};
pub use room::{Room, RoomArena};
pub use shaft::Shaft;
pub use store::{CellSnapshot, Topology};
