//! `TransitScheduler`: the car collection and its per-tick driver.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use tw_core::CarId;
use tw_topology::Topology;

use crate::car::TransitCar;
use crate::event::{CarSnapshot, RideRequest, TransitEvent};

// ── TransitConfig ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitConfig {
    /// Ticks a car holds its doors open at a stop.  Default: 60.
    pub dwell_ticks: u32,
    /// Distance below which a car counts as at its target floor, on top of
    /// its per-tick step.  Default: `1e-6`.
    pub arrival_epsilon: f64,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self { dwell_ticks: 60, arrival_epsilon: 1e-6 }
    }
}

// ── TransitScheduler ──────────────────────────────────────────────────────────

/// Owns one car per elevator shaft, keyed by shaft column.
#[derive(Clone, Debug)]
pub struct TransitScheduler {
    config:  TransitConfig,
    cars:    BTreeMap<i32, TransitCar>,
    next_id: CarId,
    /// Requests registered since the last `advance`.
    waiting: Vec<RideRequest>,
}

impl Default for TransitScheduler {
    fn default() -> Self {
        Self::new(TransitConfig::default())
    }
}

impl TransitScheduler {
    pub fn new(config: TransitConfig) -> Self {
        Self { config, cars: BTreeMap::new(), next_id: CarId(0), waiting: Vec::new() }
    }

    pub fn config(&self) -> &TransitConfig {
        &self.config
    }

    // ── Resync ────────────────────────────────────────────────────────────

    /// Reconcile the car set with the shafts currently in `topology`.
    ///
    /// - A car whose shaft vanished (or changed type, or lost every stop)
    ///   puts its passengers off at its nearest floor and is destroyed.
    /// - A surviving car is narrowed to its shaft's current floors.
    /// - A new shaft gets a car at the lobby, or at the stop nearest to it
    ///   when the lobby is not served.
    pub fn resync(&mut self, topology: &Topology, events: &mut Vec<TransitEvent>) {
        let shafts = topology.shafts();

        let gone: Vec<i32> = self
            .cars
            .iter()
            .filter(|(column, car)| {
                shafts
                    .get(*column)
                    .is_none_or(|s| s.kind != car.kind() || s.stops().next().is_none())
            })
            .map(|(column, _)| *column)
            .collect();

        for column in gone {
            let Some(mut car) = self.cars.remove(&column) else {
                continue;
            };
            let floor = topology.size().clamp_floor(car.floor());
            let evicted = car.evict_all(floor, events);
            if evicted > 0 {
                warn!(car = %car.id(), column, floor, evicted, "shaft removed under occupied car");
            }
            info!(car = %car.id(), column, "car removed");
            events.push(TransitEvent::CarRemoved { car: car.id(), column, evicted });
        }

        let lobby = topology.lobby_floor();
        for (column, shaft) in &shafts {
            if let Some(car) = self.cars.get_mut(column) {
                car.narrow(shaft, events);
                continue;
            }
            let start = if shaft.can_stop_at(lobby) { Some(lobby) } else { shaft.nearest_stop(lobby) };
            let Some(start) = start else {
                continue;
            };
            let id = self.next_id;
            self.next_id = id.next();
            self.cars.insert(*column, TransitCar::new(id, shaft, start));
            info!(car = %id, column, kind = %shaft.kind, floor = start, "car added");
            events.push(TransitEvent::CarAdded { car: id, column: *column, kind: shaft.kind });
        }
    }

    // ── Requests ──────────────────────────────────────────────────────────

    /// Record this tick's ride requests and commit each addressed car to the
    /// pickup floor.  Requests the car cannot serve are dropped.
    pub fn register(&mut self, requests: impl IntoIterator<Item = RideRequest>) {
        for req in requests {
            let Some(car) = self.cars.values_mut().find(|c| c.id() == req.car) else {
                debug!(occupant = %req.occupant, car = %req.car, "request for unknown car dropped");
                continue;
            };
            if !car.serves_trip(req.floor, req.destination, req.staff) {
                continue;
            }
            car.request_stop(req.floor);
            self.waiting.push(req);
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Move every car one tick (in column order) and exchange passengers.
    /// Pending requests are consumed.
    pub fn advance(&mut self, motion: f64, events: &mut Vec<TransitEvent>) {
        for car in self.cars.values_mut() {
            car.advance(motion, &self.config, &self.waiting, events);
        }
        self.waiting.clear();
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn car(&self, id: CarId) -> Option<&TransitCar> {
        self.cars.values().find(|c| c.id() == id)
    }

    pub fn car_mut(&mut self, id: CarId) -> Option<&mut TransitCar> {
        self.cars.values_mut().find(|c| c.id() == id)
    }

    pub fn car_at(&self, column: i32) -> Option<&TransitCar> {
        self.cars.get(&column)
    }

    /// Cars in column order.
    pub fn cars(&self) -> impl Iterator<Item = &TransitCar> {
        self.cars.values()
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    pub fn snapshots(&self) -> Vec<CarSnapshot> {
        self.cars.values().map(TransitCar::snapshot).collect()
    }
}
