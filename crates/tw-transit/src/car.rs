//! A single transit car.
//!
//! Each car is a small state machine over
//! `{Idle, Up, Down} × {doors closed, doors open (dwelling)}`.
//! While the doors are open the car exchanges passengers once per tick and
//! counts down its dwell; while they are closed it moves toward the next
//! SCAN target.

use std::collections::BTreeSet;

use tracing::trace;

use tw_core::{CarId, OccupantId, RoomType, Zone};
use tw_topology::Shaft;

use crate::event::{CarSnapshot, RideRequest, TransitEvent};
use crate::scheduler::TransitConfig;
use crate::{TransitError, TransitResult};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Idle,
    Up,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Idle => "idle",
            Direction::Up   => "up",
            Direction::Down => "down",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Doors {
    #[default]
    Closed,
    Open { remaining: u32 },
}

/// An occupant aboard a car.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Passenger {
    pub occupant:    OccupantId,
    pub destination: i32,
}

// ── TransitCar ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct TransitCar {
    id:         CarId,
    column:     i32,
    kind:       RoomType,
    position:   f64,
    direction:  Direction,
    doors:      Doors,
    pending:    BTreeSet<i32>,
    passengers: Vec<Passenger>,
    capacity:   usize,
    speed:      f64,
    zone:       Zone,
    staff_only: bool,
    /// Floors of the shaft this car runs in.
    floors:     BTreeSet<i32>,
}

impl TransitCar {
    /// A car parked with closed doors at `floor` of `shaft`.
    pub fn new(id: CarId, shaft: &Shaft, floor: i32) -> Self {
        Self {
            id,
            column: shaft.column,
            kind: shaft.kind,
            position: floor as f64,
            direction: Direction::Idle,
            doors: Doors::Closed,
            pending: BTreeSet::new(),
            passengers: Vec::new(),
            capacity: shaft.transit.capacity,
            speed: shaft.transit.speed,
            zone: shaft.transit.zone.clone(),
            staff_only: shaft.transit.staff_only,
            floors: shaft.floors.clone(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn column(&self) -> i32 {
        self.column
    }

    pub fn kind(&self) -> RoomType {
        self.kind
    }

    /// Continuous vertical position in floors.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Nearest whole floor.
    pub fn floor(&self) -> i32 {
        self.position.round() as i32
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn doors_open(&self) -> bool {
        matches!(self.doors, Doors::Open { .. })
    }

    pub fn pending(&self) -> &BTreeSet<i32> {
        &self.pending
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn load(&self) -> usize {
        self.passengers.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.passengers.len() >= self.capacity
    }

    pub fn is_idle(&self) -> bool {
        self.direction == Direction::Idle && !self.doors_open()
    }

    // ── Rules ─────────────────────────────────────────────────────────────

    /// Whether the car may stop at `floor`: it lies in the shaft and the
    /// car's zone serves it.
    pub fn can_stop_at(&self, floor: i32) -> bool {
        self.floors.contains(&floor) && self.zone.serves(floor)
    }

    /// Role check for boarding.  Service cars take staff only.
    pub fn admits(&self, staff: bool) -> bool {
        !self.staff_only || staff
    }

    /// Whether the car can carry someone from `from` to `to`.
    pub fn serves_trip(&self, from: i32, to: i32, staff: bool) -> bool {
        from != to && self.admits(staff) && self.can_stop_at(from) && self.can_stop_at(to)
    }

    /// Commit to visiting `floor`.  Returns `false` (and records nothing)
    /// when the car cannot stop there.
    pub fn request_stop(&mut self, floor: i32) -> bool {
        if !self.can_stop_at(floor) {
            return false;
        }
        self.pending.insert(floor);
        true
    }

    /// Put a passenger aboard.  The only way `passengers` grows.
    pub fn board(&mut self, passenger: Passenger) -> TransitResult<()> {
        if self.is_full() {
            return Err(TransitError::CapacityExceeded { car: self.id, capacity: self.capacity });
        }
        self.passengers.push(passenger);
        Ok(())
    }

    pub fn snapshot(&self) -> CarSnapshot {
        CarSnapshot {
            id:         self.id,
            shaft_x:    self.column,
            kind:       self.kind,
            position:   self.position,
            direction:  self.direction,
            doors_open: self.doors_open(),
            load:       self.passengers.len(),
            capacity:   self.capacity,
            pending:    self.pending.iter().copied().collect(),
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// One tick of car behaviour.  `waiting` holds this tick's ride requests
    /// for every car; only those addressed to this car are considered.
    pub(crate) fn advance(
        &mut self,
        motion: f64,
        config: &TransitConfig,
        waiting: &[RideRequest],
        events: &mut Vec<TransitEvent>,
    ) {
        if let Doors::Open { remaining } = self.doors {
            self.exchange(waiting, events);
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                let floor = self.floor();
                self.doors = Doors::Closed;
                self.pending.remove(&floor);
                self.resume_direction();
            } else {
                self.doors = Doors::Open { remaining };
            }
            return;
        }

        let Some(target) = self.next_target() else {
            self.direction = Direction::Idle;
            return;
        };

        let dist = target as f64 - self.position;
        let step = self.speed * motion.max(0.0);
        if dist.abs() <= step + config.arrival_epsilon {
            self.position = target as f64;
            self.doors = Doors::Open { remaining: config.dwell_ticks.max(1) };
            self.pending.remove(&target);
            if dist > 0.0 {
                self.direction = Direction::Up;
            } else if dist < 0.0 {
                self.direction = Direction::Down;
            }
            trace!(car = %self.id, floor = target, "car arrived");
            events.push(TransitEvent::Arrived { car: self.id, column: self.column, floor: target });
        } else {
            self.direction = if dist > 0.0 { Direction::Up } else { Direction::Down };
            self.position += step * dist.signum();
        }
    }

    /// Unload everyone bound for this floor, then load matching requests in
    /// order until the car is full.
    fn exchange(&mut self, waiting: &[RideRequest], events: &mut Vec<TransitEvent>) {
        let floor = self.floor();

        let (leaving, staying): (Vec<Passenger>, Vec<Passenger>) = self
            .passengers
            .drain(..)
            .partition(|p| p.destination == floor);
        self.passengers = staying;
        for p in leaving {
            events.push(TransitEvent::Disembarked {
                occupant: p.occupant,
                car: self.id,
                column: self.column,
                floor,
            });
        }

        let id = self.id;
        for req in waiting.iter().filter(|r| r.car == id && r.floor == floor) {
            if self.passengers.iter().any(|p| p.occupant == req.occupant) {
                continue;
            }
            if !self.serves_trip(floor, req.destination, req.staff) {
                continue;
            }
            let passenger = Passenger { occupant: req.occupant, destination: req.destination };
            if self.board(passenger).is_err() {
                break;
            }
            self.pending.insert(req.destination);
            events.push(TransitEvent::Boarded {
                occupant: req.occupant,
                car: self.id,
                column: self.column,
                floor,
            });
        }
    }

    /// SCAN target selection.  Pickup-only stops are skipped while full.
    fn next_target(&self) -> Option<i32> {
        let full = self.is_full();
        let eligible: Vec<i32> = self
            .pending
            .iter()
            .copied()
            .filter(|f| !full || self.passengers.iter().any(|p| p.destination == *f))
            .collect();

        let pos = self.position;
        let up = eligible.iter().copied().filter(|f| *f as f64 >= pos).min();
        let down = eligible.iter().copied().filter(|f| *f as f64 <= pos).max();

        match self.direction {
            Direction::Up => up.or(down),
            Direction::Down => down.or(up),
            Direction::Idle => eligible.iter().copied().min_by(|a, b| {
                let da = (*a as f64 - pos).abs();
                let db = (*b as f64 - pos).abs();
                da.total_cmp(&db).then(a.cmp(b))
            }),
        }
    }

    /// Direction after the doors close: keep going while work remains
    /// ahead, otherwise reverse, otherwise idle.
    fn resume_direction(&mut self) {
        let pos = self.position;
        let above = self.pending.iter().any(|f| *f as f64 > pos);
        let below = self.pending.iter().any(|f| (*f as f64) < pos);
        self.direction = match (self.direction, above, below) {
            (Direction::Up, true, _) => Direction::Up,
            (Direction::Down, _, true) => Direction::Down,
            (Direction::Up, false, true) => Direction::Down,
            (Direction::Down, true, false) => Direction::Up,
            _ => Direction::Idle,
        };
    }

    // ── Resync support ────────────────────────────────────────────────────

    /// Conform to a changed shaft of the same type.  Unservable stops are
    /// dropped, a stranded car jumps to the nearest stop, and passengers
    /// whose destination vanished are put off.
    pub(crate) fn narrow(&mut self, shaft: &Shaft, events: &mut Vec<TransitEvent>) {
        if self.floors == shaft.floors {
            return;
        }
        self.floors = shaft.floors.clone();
        let floors = &self.floors;
        let zone = &self.zone;
        self.pending.retain(|f| floors.contains(f) && zone.serves(*f));

        let here = self.floor();
        let outside = match (self.floors.first(), self.floors.last()) {
            (Some(lo), Some(hi)) => self.position < *lo as f64 || self.position > *hi as f64,
            _ => true,
        };
        if outside || (self.doors_open() && !self.can_stop_at(here)) {
            if let Some(stop) = shaft.nearest_stop(here) {
                self.position = stop as f64;
                self.doors = Doors::Closed;
                self.direction = Direction::Idle;
            }
        }

        let floor = self.floor();
        let (evicted, kept): (Vec<Passenger>, Vec<Passenger>) = self
            .passengers
            .drain(..)
            .partition(|p| !shaft.can_stop_at(p.destination));
        self.passengers = kept;
        for p in evicted {
            events.push(TransitEvent::Disembarked {
                occupant: p.occupant,
                car: self.id,
                column: self.column,
                floor,
            });
        }
    }

    /// Put everyone off at once; used when the shaft is gone.
    pub(crate) fn evict_all(&mut self, floor: i32, events: &mut Vec<TransitEvent>) -> usize {
        let count = self.passengers.len();
        for p in self.passengers.drain(..) {
            events.push(TransitEvent::Disembarked {
                occupant: p.occupant,
                car: self.id,
                column: self.column,
                floor,
            });
        }
        count
    }
}
