//! Room entities and the arena that owns them.

use tw_core::{GridPos, OccupantId, RoomId, RoomSpec, RoomType, TransitSpec};

/// Upper bound of a room's dirt level.
pub const MAX_DIRT: f32 = 100.0;

// ── Room ──────────────────────────────────────────────────────────────────────

/// A placed room.  Geometry is fixed at placement time; the per-room state
/// (dirt, stress, occupants, sale flag) is updated by the simulation.
#[derive(Clone, Debug)]
pub struct Room {
    id:        RoomId,
    kind:      RoomType,
    origin:    GridPos,
    width:     u32,
    capacity:  usize,
    transit:   Option<TransitSpec>,
    pub(crate) connected: bool,
    /// Lobby rooms lifted off the grid when a transit room was placed over
    /// them.  Put back when this room is removed.
    pub(crate) replaced: Vec<Room>,

    pub dirt:      f32,
    pub stress:    f32,
    pub occupants: Vec<OccupantId>,
    /// Set once a condo has been sold.
    pub sold:      bool,
}

impl Room {
    pub(crate) fn new(id: RoomId, kind: RoomType, origin: GridPos, spec: &RoomSpec) -> Self {
        Self {
            id,
            kind,
            origin,
            width: spec.width.max(1),
            capacity: spec.occupancy,
            transit: spec.transit.clone(),
            connected: false,
            replaced: Vec::new(),
            dirt: 0.0,
            stress: 0.0,
            occupants: Vec::new(),
            sold: false,
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn kind(&self) -> RoomType {
        self.kind
    }

    /// Leftmost footprint cell.
    pub fn origin(&self) -> GridPos {
        self.origin
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn floor(&self) -> i32 {
        self.origin.floor
    }

    /// Horizontal centre of the footprint, where walkers aim.
    pub fn center_x(&self) -> f64 {
        self.origin.x as f64 + (self.width as f64 - 1.0) / 2.0
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn transit(&self) -> Option<&TransitSpec> {
        self.transit.as_ref()
    }

    /// Maximum occupants that may call this room home.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.occupants.len())
    }

    pub fn footprint(&self) -> impl Iterator<Item = GridPos> + '_ {
        (0..self.width as i32).map(move |dx| self.origin.shifted(dx))
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.floor == self.origin.floor
            && pos.x >= self.origin.x
            && pos.x < self.origin.x + self.width as i32
    }

    /// Add dirt, saturating at [`MAX_DIRT`].
    pub fn add_dirt(&mut self, amount: f32) {
        self.dirt = (self.dirt + amount).clamp(0.0, MAX_DIRT);
    }

    /// Reset dirt; returns `false` when the room was already clean.
    pub fn clean(&mut self) -> bool {
        let was_dirty = self.dirt > 0.0;
        self.dirt = 0.0;
        was_dirty
    }
}

// ── RoomArena ─────────────────────────────────────────────────────────────────

/// Slot storage for rooms, indexed by `RoomId`.
///
/// Slots are never reused: a new room always gets a fresh id, so a stale id
/// held elsewhere resolves to `None` rather than to an unrelated room.  The
/// one exception is [`restore`](Self::restore), which puts a lifted lobby
/// room back into its own original slot.
#[derive(Clone, Debug, Default)]
pub struct RoomArena {
    slots: Vec<Option<Room>>,
    live:  usize,
}

impl RoomArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id and store the room built for it.
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(RoomId) -> Room) -> RoomId {
        let id = RoomId(self.slots.len() as u32);
        self.slots.push(Some(build(id)));
        self.live += 1;
        id
    }

    pub(crate) fn remove(&mut self, id: RoomId) -> Option<Room> {
        let room = self.slots.get_mut(id.index())?.take()?;
        self.live -= 1;
        Some(room)
    }

    /// Return a previously removed room to its own slot.
    pub(crate) fn restore(&mut self, room: Room) {
        if let Some(slot) = self.slots.get_mut(room.id.index()) {
            if slot.is_none() {
                self.live += 1;
            }
            *slot = Some(room);
        }
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.slots.get(id.index())?.as_ref()
    }

    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    /// Live rooms in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Room> {
        self.slots.iter_mut().flatten()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
