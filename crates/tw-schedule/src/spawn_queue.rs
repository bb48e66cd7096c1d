//! `SpawnQueue`: arrivals waiting for their release tick.
//!
//! An inbound window may produce dozens of arrivals at once.  Rather than
//! dropping them all at the entrance on one tick, the spawn policy spreads
//! them out: each order is queued at a future tick and released by
//! [`drain_due`](SpawnQueue::drain_due).

use std::collections::BTreeMap;

use tw_core::{OccupantKind, RoomId, Tick};

/// One occupant to create: its role and the room it is headed for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SpawnOrder {
    pub kind: OccupantKind,
    pub room: RoomId,
}

/// Priority queue mapping release ticks to spawn orders.
#[derive(Clone, Debug, Default)]
pub struct SpawnQueue {
    inner: BTreeMap<Tick, Vec<SpawnOrder>>,
    /// Cached total order count for O(1) `len()`.
    total: usize,
}

impl SpawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: Tick, order: SpawnOrder) {
        self.inner.entry(tick).or_default().push(order);
        self.total += 1;
    }

    /// Remove and return every order due at or before `now`, oldest first.
    pub fn drain_due(&mut self, now: Tick) -> Vec<SpawnOrder> {
        let later = self.inner.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        let orders: Vec<SpawnOrder> = due.into_values().flatten().collect();
        self.total -= orders.len();
        orders
    }

    /// Orders already queued for `room` (counted against its free slots).
    pub fn pending_for(&self, room: RoomId) -> usize {
        self.inner
            .values()
            .flatten()
            .filter(|o| o.room == room)
            .count()
    }

    /// Drop every queued order for `room`, e.g. after it was demolished.
    pub fn cancel_room(&mut self, room: RoomId) -> usize {
        let mut dropped = 0;
        for orders in self.inner.values_mut() {
            let before = orders.len();
            orders.retain(|o| o.room != room);
            dropped += before - orders.len();
        }
        self.inner.retain(|_, orders| !orders.is_empty());
        self.total -= dropped;
        dropped
    }

    /// The earliest tick with at least one queued order.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
