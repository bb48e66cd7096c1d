//! `OccupantStore`: every live occupant, ordered by id.

use tw_core::{OccupantId, OccupantKind, RoomId};

use crate::occupant::{Occupant, OccupantState};

/// Occupants are kept in a `Vec` sorted by id.  Ids are handed out in
/// increasing order and never reused, so appending keeps the order and
/// lookups are a binary search.
#[derive(Clone, Debug, Default)]
pub struct OccupantStore {
    occupants: Vec<Occupant>,
    next_id:   OccupantId,
}

impl OccupantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next id.
    pub fn allocate_id(&mut self) -> OccupantId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    pub fn insert(&mut self, occupant: Occupant) {
        match self.occupants.last() {
            Some(last) if last.id > occupant.id => {
                let at = self.occupants.partition_point(|o| o.id < occupant.id);
                self.occupants.insert(at, occupant);
            }
            _ => self.occupants.push(occupant),
        }
    }

    pub fn get(&self, id: OccupantId) -> Option<&Occupant> {
        let i = self.occupants.binary_search_by_key(&id, |o| o.id).ok()?;
        self.occupants.get(i)
    }

    pub fn get_mut(&mut self, id: OccupantId) -> Option<&mut Occupant> {
        let i = self.occupants.binary_search_by_key(&id, |o| o.id).ok()?;
        self.occupants.get_mut(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Occupant> {
        self.occupants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Occupant> {
        self.occupants.iter_mut()
    }

    /// Live occupants whose home is `room`.
    pub fn assigned_to(&self, room: RoomId) -> usize {
        self.occupants
            .iter()
            .filter(|o| o.is_active() && o.home == Some(room))
            .count()
    }

    pub fn any_active(&self, kind: OccupantKind) -> bool {
        self.occupants.iter().any(|o| o.kind == kind && o.is_active())
    }

    /// Drop despawned records; returns their ids.
    pub fn purge(&mut self) -> Vec<OccupantId> {
        let mut removed = Vec::new();
        self.occupants.retain(|o| {
            let gone = o.state == OccupantState::Despawned;
            if gone {
                removed.push(o.id);
            }
            !gone
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}
