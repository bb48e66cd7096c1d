//! Connectivity: breadth-first flood fill from the lobby floor.
//!
//! A room is connected iff one of its cells is reachable from a lobby-floor
//! cell by
//!
//! - stepping left or right into a non-empty cell, or
//! - stepping up or down into a cell of the same transit room type
//!   (stairs to stairs, express to express, ...).  Elevator cells only
//!   carry vertically inside the run that owns the column's car; a second,
//!   car-less run in the same column is a plain walkable cell.
//!
//! Horizontal steps into or out of a transit cell are only allowed on floors
//! its zone serves.  Reaching any cell of a footprint reaches all of it.
//!
//! The pass is a full O(area) recompute; it only runs after a structural
//! mutation.

use std::collections::VecDeque;

use tracing::debug;

use tw_core::GridPos;

use crate::store::Topology;

/// Outcome of one connectivity pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectivityReport {
    /// Rooms connected after the pass.
    pub connected: usize,
    /// Rooms not connected after the pass.
    pub disconnected: usize,
    /// Rooms whose flag flipped.
    pub changed: usize,
}

impl Topology {
    /// Recompute every room's connected flag and clear the stale marker.
    pub fn recompute_connectivity(&mut self) -> ConnectivityReport {
        let mut reached = vec![false; self.size.area()];
        let mut queue: VecDeque<GridPos> = VecDeque::new();
        let shafts = self.shafts();

        for x in 0..self.size.width as i32 {
            self.enqueue(GridPos::new(x, self.lobby_floor), &mut reached, &mut queue);
        }

        while let Some(pos) = queue.pop_front() {
            let Some(room) = self.room_at(pos) else {
                continue;
            };

            for cell in room.footprint() {
                self.enqueue(cell, &mut reached, &mut queue);
            }

            if self.opens_sideways(pos) {
                for dx in [-1, 1] {
                    let next = pos.shifted(dx);
                    if self.opens_sideways(next) {
                        self.enqueue(next, &mut reached, &mut queue);
                    }
                }
            }

            let carries = room.transit().is_some_and(|spec| {
                !spec.is_car() || shafts.get(&pos.x).is_some_and(|s| s.floors.contains(&pos.floor))
            });
            if carries {
                for df in [-1, 1] {
                    let next = pos.raised(df);
                    if self.kind_at(next) == Some(room.kind()) {
                        self.enqueue(next, &mut reached, &mut queue);
                    }
                }
            }
        }

        let mut report = ConnectivityReport::default();
        let size = self.size;
        for room in self.rooms.iter_mut() {
            let now = room
                .footprint()
                .any(|cell| size.index(cell).is_some_and(|i| reached[i]));
            if now != room.connected {
                report.changed += 1;
            }
            room.connected = now;
            if now {
                report.connected += 1;
            } else {
                report.disconnected += 1;
            }
        }
        self.dirty = false;

        debug!(
            connected = report.connected,
            disconnected = report.disconnected,
            changed = report.changed,
            "connectivity recomputed"
        );
        report
    }

    /// Mark and queue an occupied, not yet reached cell.
    fn enqueue(&self, pos: GridPos, reached: &mut [bool], queue: &mut VecDeque<GridPos>) {
        let Some(index) = self.size.index(pos) else {
            return;
        };
        if reached[index] || self.cells[index].is_none() {
            return;
        }
        reached[index] = true;
        queue.push_back(pos);
    }

    /// Whether a walker may cross the side of the cell at `pos`: the cell is
    /// occupied, and if it is transit its zone serves this floor.
    fn opens_sideways(&self, pos: GridPos) -> bool {
        match self.room_at(pos) {
            None => false,
            Some(room) => room
                .transit()
                .is_none_or(|spec| spec.zone.serves(pos.floor)),
        }
    }
}
