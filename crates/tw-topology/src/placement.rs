//! Placement and removal.
//!
//! Both operations validate everything before writing, then update the
//! whole footprint at once.  A rejected operation leaves the grid untouched.

use tracing::debug;

use tw_core::{GridPos, RoomId, RoomType};

use crate::error::{DemolitionError, PlacementError, PlacementResult};
use crate::room::Room;
use crate::store::Topology;

impl Topology {
    /// Check whether `kind` can be placed with its leftmost cell at `origin`.
    ///
    /// Order of checks: catalog lookup, grid bounds, zoning, then footprint
    /// emptiness.  A transit type may sit on a lobby cell.
    pub fn check_placement(&self, origin: GridPos, kind: RoomType) -> PlacementResult<()> {
        let spec = self.catalog.spec(kind)?;
        let width = spec.width.max(1);

        let footprint = (0..width as i32).map(|dx| origin.shifted(dx));
        if footprint.clone().any(|pos| !self.size.contains(pos)) {
            return Err(PlacementError::OutOfBounds { origin, width });
        }

        if !spec.placement.permits(origin.floor, self.lobby_floor) {
            return Err(PlacementError::Zoning { kind, floor: origin.floor });
        }

        let overrides_lobby = spec.transit.is_some();
        for pos in footprint {
            match self.kind_at(pos) {
                None => {}
                Some(RoomType::Lobby) if overrides_lobby => {}
                Some(_) => return Err(PlacementError::FootprintOccupied { at: pos }),
            }
        }
        Ok(())
    }

    pub fn can_place(&self, origin: GridPos, kind: RoomType) -> bool {
        self.check_placement(origin, kind).is_ok()
    }

    /// Place a room, returning its new id.
    pub fn place(&mut self, origin: GridPos, kind: RoomType) -> PlacementResult<RoomId> {
        self.check_placement(origin, kind)?;
        let spec = self.catalog.spec(kind)?.clone();

        let mut room_cells = Vec::with_capacity(spec.width.max(1) as usize);
        let mut replaced = Vec::new();
        for dx in 0..spec.width.max(1) as i32 {
            let pos = origin.shifted(dx);
            let Some(index) = self.size.index(pos) else {
                return Err(PlacementError::OutOfBounds { origin, width: spec.width });
            };
            room_cells.push(index);
            let existing = self.cells[index];
            if let Some(lobby) = existing.and_then(|id| self.rooms.remove(id)) {
                replaced.push(lobby);
            }
        }

        let id = self.rooms.insert_with(|id| {
            let mut room = Room::new(id, kind, origin, &spec);
            room.replaced = replaced;
            room
        });
        for index in room_cells {
            self.cells[index] = Some(id);
        }
        self.touch();

        debug!(room = %id, %kind, %origin, "room placed");
        Ok(id)
    }

    /// Remove the room covering `pos` (any cell of its footprint).
    ///
    /// Lobby cells that a transit room replaced are restored, so `place`
    /// followed by `remove` leaves the grid as it was.
    pub fn remove(&mut self, pos: GridPos) -> Result<Room, DemolitionError> {
        if !self.size.contains(pos) {
            return Err(DemolitionError::OutOfBounds { at: pos });
        }
        let Some(room) = self.room_at(pos) else {
            return Err(DemolitionError::Empty { at: pos });
        };
        let (id, kind) = (room.id(), room.kind());
        if kind.is_protected() {
            return Err(DemolitionError::Protected { kind, at: pos });
        }
        self.catalog.spec(kind)?;

        let Some(mut room) = self.rooms.remove(id) else {
            return Err(DemolitionError::Empty { at: pos });
        };
        for cell in room.footprint() {
            if let Some(index) = self.size.index(cell) {
                self.cells[index] = None;
            }
        }
        for lobby in room.replaced.drain(..) {
            for cell in lobby.footprint() {
                if let Some(index) = self.size.index(cell) {
                    self.cells[index] = Some(lobby.id());
                }
            }
            self.rooms.restore(lobby);
        }
        self.touch();

        debug!(room = %id, %kind, origin = %room.origin(), "room removed");
        Ok(room)
    }
}
