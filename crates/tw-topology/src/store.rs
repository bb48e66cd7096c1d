//! The `Topology` store: catalog, index grid, and room arena.

use tracing::debug;

use tw_core::{Catalog, ConfigError, ConfigResult, GridPos, GridSize, RoomId, RoomType};

use crate::room::{Room, RoomArena};

// ── CellSnapshot ──────────────────────────────────────────────────────────────

/// Read-only view of one grid cell for collaborators (renderers, persistence).
///
/// Every cell of a footprint reports the state of its room; `anchor` is the
/// room's leftmost cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSnapshot {
    pub position:  GridPos,
    /// `None` for an empty cell.
    pub kind:      Option<RoomType>,
    pub room:      Option<RoomId>,
    pub anchor:    Option<GridPos>,
    pub connected: bool,
    pub occupancy: usize,
    pub dirt:      f32,
    pub stress:    f32,
}

// ── Topology ──────────────────────────────────────────────────────────────────

/// Owner of the building grid.
///
/// Structural mutation goes through [`place`](Self::place) and
/// [`remove`](Self::remove) only; both mark connectivity stale and bump
/// [`revision`](Self::revision).  Connectivity flags are derived state and
/// are refreshed by [`recompute_connectivity`](Self::recompute_connectivity).
#[derive(Clone, Debug)]
pub struct Topology {
    pub(crate) size:        GridSize,
    pub(crate) lobby_floor: i32,
    pub(crate) catalog:     Catalog,
    pub(crate) cells:       Vec<Option<RoomId>>,
    pub(crate) rooms:       RoomArena,
    pub(crate) dirty:       bool,
    pub(crate) revision:    u64,
}

impl Topology {
    /// Create a grid whose lobby floor is filled with single-cell lobby rooms.
    pub fn new(size: GridSize, lobby_floor: i32, catalog: Catalog) -> ConfigResult<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be non-empty, got {}x{}",
                size.width, size.height
            )));
        }
        if lobby_floor < 0 || lobby_floor as u32 >= size.height {
            return Err(ConfigError::Invalid(format!(
                "lobby floor {lobby_floor} is outside a grid of height {}",
                size.height
            )));
        }
        let lobby_spec = catalog.spec(RoomType::Lobby)?.clone();

        let mut topo = Self {
            size,
            lobby_floor,
            catalog,
            cells: vec![None; size.area()],
            rooms: RoomArena::new(),
            dirty: true,
            revision: 0,
        };

        for x in 0..size.width as i32 {
            let pos = GridPos::new(x, lobby_floor);
            let id = topo
                .rooms
                .insert_with(|id| Room::new(id, RoomType::Lobby, pos, &lobby_spec));
            if let Some(i) = size.index(pos) {
                topo.cells[i] = Some(id);
            }
        }
        topo.recompute_connectivity();

        debug!(width = size.width, height = size.height, lobby_floor, "topology initialised");
        Ok(topo)
    }

    // ── Configuration ─────────────────────────────────────────────────────

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn lobby_floor(&self) -> i32 {
        self.lobby_floor
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Bumped on every successful placement or removal.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// `true` when the grid changed since the last connectivity pass.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn touch(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn room_id_at(&self, pos: GridPos) -> Option<RoomId> {
        self.cells[self.size.index(pos)?]
    }

    pub fn room_at(&self, pos: GridPos) -> Option<&Room> {
        self.rooms.get(self.room_id_at(pos)?)
    }

    pub fn kind_at(&self, pos: GridPos) -> Option<RoomType> {
        self.room_at(pos).map(Room::kind)
    }

    pub fn is_connected(&self, pos: GridPos) -> bool {
        self.room_at(pos).is_some_and(Room::connected)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn rooms_mut(&mut self) -> impl Iterator<Item = &mut Room> {
        self.rooms.iter_mut()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Connected rooms of `kind` in id order.
    pub fn connected_rooms(&self, kind: RoomType) -> impl Iterator<Item = &Room> {
        self.rooms
            .iter()
            .filter(move |r| r.kind() == kind && r.connected())
    }

    /// Snapshot of one cell, or `None` outside the grid.
    pub fn cell(&self, pos: GridPos) -> Option<CellSnapshot> {
        let index = self.size.index(pos)?;
        let snapshot = match self.cells[index].and_then(|id| self.rooms.get(id)) {
            None => CellSnapshot {
                position: pos,
                kind: None,
                room: None,
                anchor: None,
                connected: false,
                occupancy: 0,
                dirt: 0.0,
                stress: 0.0,
            },
            Some(room) => CellSnapshot {
                position: pos,
                kind: Some(room.kind()),
                room: Some(room.id()),
                anchor: Some(room.origin()),
                connected: room.connected(),
                occupancy: room.occupants.len(),
                dirt: room.dirt,
                stress: room.stress,
            },
        };
        Some(snapshot)
    }

    // ── Room state ────────────────────────────────────────────────────────

    /// Reset the dirt of the room covering `pos`.  Returns whether there was
    /// anything to clean.
    pub fn clean(&mut self, pos: GridPos) -> bool {
        let Some(id) = self.room_id_at(pos) else {
            return false;
        };
        self.clean_room(id)
    }

    pub fn clean_room(&mut self, id: RoomId) -> bool {
        self.rooms.get_mut(id).is_some_and(Room::clean)
    }

    pub fn add_dirt(&mut self, id: RoomId, amount: f32) {
        if let Some(room) = self.rooms.get_mut(id) {
            room.add_dirt(amount);
        }
    }
}
