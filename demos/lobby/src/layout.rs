//! The stock demo building, laid out relative to the lobby floor.
//!
//! ```text
//!  L+8  E . F F F . . . . . . S
//!  L+7  E . C C C C . . . . . S
//!  L+6  E . H H H H . . . . . S
//!  L+5  E . H H H H . . . . . S
//!  L+1…4 E . O O O O . . . . . S . . . . . . . s f f f
//!  L    lobby ──────────────────────────────────────────
//!  L-1  E P P P P
//!  L-2  E P P P P
//! ```
//!
//! `E` elevator (column 5), `S` service elevator (column 12), `s` stairs
//! (column 20) with a food court beside them on L+2.

use tw_core::{GridPos, RoomType};
use tw_sim::TowerBuilder;

/// Columns and extents the layout needs.
pub const MIN_WIDTH:  u32 = 24;
pub const ABOVE:      i32 = 8;
pub const BELOW:      i32 = 2;

pub fn lobby_layout(builder: TowerBuilder, lobby: i32) -> TowerBuilder {
    let mut b = builder
        .column(5, lobby - BELOW, lobby + ABOVE, RoomType::Elevator)
        .column(12, lobby, lobby + ABOVE, RoomType::ServiceElevator)
        .column(20, lobby, lobby + 3, RoomType::Stairs);

    for floor in lobby + 1..=lobby + 4 {
        b = b
            .room(GridPos::new(6, floor), RoomType::Office)
            .room(GridPos::new(8, floor), RoomType::Office);
    }
    for floor in lobby + 5..=lobby + 6 {
        b = b
            .room(GridPos::new(6, floor), RoomType::Hotel)
            .room(GridPos::new(8, floor), RoomType::Hotel);
    }
    b = b
        .room(GridPos::new(6, lobby + 7), RoomType::Condo)
        .room(GridPos::new(6, lobby + 8), RoomType::Food)
        .room(GridPos::new(21, lobby + 2), RoomType::Food);

    for floor in lobby - BELOW..lobby {
        for x in 6..10 {
            b = b.room(GridPos::new(x, floor), RoomType::Parking);
        }
    }
    b
}
