//! Money and wear: rent and soiling at rollover, income and dirt per
//! arrival, janitor cleaning.

use tracing::{debug, info, warn};

use tw_agent::AgentEvent;
use tw_core::{Income, OccupantKind, RoomId, RoomType};

use crate::{EconomicEvent, Tower, TowerEvent};

/// Room types that pick up the daily random soiling.
const SOILABLE: [RoomType; 3] = [RoomType::Office, RoomType::Hotel, RoomType::Food];

impl Tower {
    /// Start-of-day work for one midnight wrap.
    pub(crate) fn start_day(&mut self, day: u32) {
        self.windows.reset_day();
        self.pay_rent();
        self.soil_random_room();
        info!(day, "day started");
        self.events.push(TowerEvent::DayStarted { day });
    }

    fn pay_rent(&mut self) {
        let catalog = self.topology.catalog();
        let mut rents = Vec::new();
        for room in self.topology.rooms().filter(|r| r.connected()) {
            let Ok(spec) = catalog.spec(room.kind()) else {
                continue;
            };
            let amount = match spec.income {
                Some(Income::DailyRent(n)) => n,
                Some(Income::OccupiedRent(n)) if !room.occupants.is_empty() => n,
                _ => continue,
            };
            rents.push(EconomicEvent::Rent { room: room.id(), kind: room.kind(), amount });
        }
        let total: i64 = rents.iter().map(EconomicEvent::amount).sum();
        debug!(rooms = rents.len(), total, "rent collected");
        self.events.extend(rents.into_iter().map(TowerEvent::Economic));
    }

    fn soil_random_room(&mut self) {
        let candidates: Vec<RoomId> = self
            .topology
            .rooms()
            .filter(|r| r.connected() && SOILABLE.contains(&r.kind()))
            .map(|r| r.id())
            .collect();
        if let Some(&room) = self.soil_rng.choose(&candidates) {
            self.topology.add_dirt(room, self.config.daily_soiling);
            debug!(%room, "room soiled overnight");
        }
    }

    /// Arrival side effects: janitors clean, everyone else leaves dirt and
    /// possibly money behind.
    pub(crate) fn settle_arrivals(&mut self, events: &[AgentEvent]) {
        for event in events {
            let AgentEvent::Arrived { kind, room, .. } = *event else {
                continue;
            };
            if kind == OccupantKind::Janitor {
                if self.topology.clean_room(room) {
                    debug!(%room, "room cleaned");
                }
                continue;
            }
            self.topology.add_dirt(room, self.config.dirt_per_visit);
            if let Some(income) = self.arrival_income(kind, room) {
                self.events.push(TowerEvent::Economic(income));
            }
        }
    }

    fn arrival_income(&mut self, kind: OccupantKind, id: RoomId) -> Option<EconomicEvent> {
        let room_type = self.topology.room(id)?.kind();
        let income = match self.topology.catalog().spec(room_type) {
            Ok(spec) => spec.income,
            Err(e) => {
                warn!(room = %id, error = %e, "arrival in room without catalog entry");
                return None;
            }
        };
        match (kind, income?) {
            (OccupantKind::Visitor, Income::PerVisit(amount)) => {
                Some(EconomicEvent::Income { room: id, kind: room_type, amount })
            }
            (OccupantKind::Resident, Income::Sale(amount)) => {
                let room = self.topology.room_mut(id)?;
                if room.sold {
                    return None;
                }
                room.sold = true;
                info!(room = %id, amount, "condo sold");
                Some(EconomicEvent::Sale { room: id, amount })
            }
            _ => None,
        }
    }
}
