//! Shaft detection.
//!
//! A shaft is a vertical run of one elevator room type in a single column.
//! The transit scheduler keeps exactly one car per shaft.  When a column
//! holds several runs, the one containing the lobby floor wins, otherwise
//! the lowest.  The other runs get no car and do not link floors for
//! connectivity.  Stairs never form a shaft; walkers climb them directly.

use std::collections::{BTreeMap, BTreeSet};

use tw_core::{GridPos, RoomType, TransitSpec};

use crate::store::Topology;

/// One elevator shaft as seen by the scheduler.
#[derive(Clone, Debug, PartialEq)]
pub struct Shaft {
    pub column:  i32,
    pub kind:    RoomType,
    pub transit: TransitSpec,
    /// Floors covered by the run, contiguous.
    pub floors:  BTreeSet<i32>,
}

impl Shaft {
    /// Whether a car in this shaft may stop at `floor`.
    pub fn can_stop_at(&self, floor: i32) -> bool {
        self.floors.contains(&floor) && self.transit.zone.serves(floor)
    }

    /// Floors a car in this shaft may stop at, ascending.
    pub fn stops(&self) -> impl Iterator<Item = i32> + '_ {
        self.floors
            .iter()
            .copied()
            .filter(|f| self.transit.zone.serves(*f))
    }

    /// The stop closest to `floor`; ties go to the lower floor.
    pub fn nearest_stop(&self, floor: i32) -> Option<i32> {
        self.stops().min_by_key(|f| ((f - floor).abs(), *f))
    }
}

impl Topology {
    /// Every elevator shaft in the building, keyed by column.
    pub fn shafts(&self) -> BTreeMap<i32, Shaft> {
        let mut shafts = BTreeMap::new();
        for column in 0..self.size.width as i32 {
            if let Some(shaft) = self.shaft_in_column(column) {
                shafts.insert(column, shaft);
            }
        }
        shafts
    }

    fn shaft_in_column(&self, column: i32) -> Option<Shaft> {
        let mut runs: Vec<Shaft> = Vec::new();
        for floor in 0..self.size.height as i32 {
            let Some(room) = self.room_at(GridPos::new(column, floor)) else {
                continue;
            };
            let Some(transit) = room.transit().filter(|t| t.is_car()) else {
                continue;
            };
            match runs.last_mut() {
                Some(run) if run.kind == room.kind() && run.floors.contains(&(floor - 1)) => {
                    run.floors.insert(floor);
                }
                _ => runs.push(Shaft {
                    column,
                    kind: room.kind(),
                    transit: transit.clone(),
                    floors: BTreeSet::from([floor]),
                }),
            }
        }

        let lobby = self.lobby_floor;
        let lobby_run = runs.iter().position(|r| r.floors.contains(&lobby));
        match lobby_run {
            Some(i) => Some(runs.swap_remove(i)),
            None => runs.into_iter().next(),
        }
    }

    /// `true` when every floor between `from` and `to` (inclusive) has stairs
    /// in `column`.
    pub fn stairs_connect(&self, column: i32, from: i32, to: i32) -> bool {
        let (lo, hi) = (from.min(to), from.max(to));
        (lo..=hi).all(|floor| self.kind_at(GridPos::new(column, floor)) == Some(RoomType::Stairs))
    }

    /// Columns holding stairs on `floor`, ascending.
    pub fn stair_columns(&self, floor: i32) -> impl Iterator<Item = i32> + '_ {
        (0..self.size.width as i32)
            .filter(move |x| self.kind_at(GridPos::new(*x, floor)) == Some(RoomType::Stairs))
    }
}
