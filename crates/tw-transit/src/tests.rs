//! Unit tests for tw-transit.

use tw_core::{CarId, Catalog, GridPos, GridSize, OccupantId, RoomType};
use tw_topology::Topology;

use crate::{Direction, RideRequest, TransitConfig, TransitEvent, TransitScheduler};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn building(height: u32, lobby: i32) -> Topology {
    Topology::new(GridSize::new(6, height), lobby, Catalog::standard(lobby, height)).unwrap()
}

fn shaft(topo: &mut Topology, column: i32, floors: std::ops::RangeInclusive<i32>, ty: RoomType) {
    for f in floors {
        topo.place(GridPos::new(column, f), ty).unwrap();
    }
    topo.recompute_connectivity();
}

fn scheduler(topo: &Topology, dwell_ticks: u32) -> TransitScheduler {
    let mut sched = TransitScheduler::new(TransitConfig { dwell_ticks, ..TransitConfig::default() });
    let mut events = Vec::new();
    sched.resync(topo, &mut events);
    sched
}

fn request(occupant: u32, floor: i32, destination: i32) -> RideRequest {
    RideRequest { occupant: OccupantId(occupant), car: CarId(0), floor, destination, staff: false }
}

fn arrivals(events: &[TransitEvent]) -> Vec<i32> {
    events
        .iter()
        .filter_map(|e| match e {
            TransitEvent::Arrived { floor, .. } => Some(*floor),
            _ => None,
        })
        .collect()
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch {
    use super::*;

    #[test]
    fn new_shaft_gets_car_at_lobby() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 0..=9, RoomType::Elevator);
        let mut sched = TransitScheduler::default();
        let mut events = Vec::new();
        sched.resync(&topo, &mut events);
        assert_eq!(
            events,
            vec![TransitEvent::CarAdded { car: CarId(0), column: 2, kind: RoomType::Elevator }]
        );
        let car = sched.car_at(2).unwrap();
        assert_eq!(car.position(), 0.0);
        assert!(car.is_idle());

        // A second resync against the same shafts changes nothing.
        events.clear();
        sched.resync(&topo, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn shaft_off_lobby_starts_at_nearest_stop() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 4..=6, RoomType::Elevator);
        let sched = scheduler(&topo, 5);
        assert_eq!(sched.car_at(2).unwrap().floor(), 4);
    }

    #[test]
    fn idle_car_with_empty_pending_does_not_move() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 0..=9, RoomType::Elevator);
        let mut sched = scheduler(&topo, 5);
        let mut events = Vec::new();
        for _ in 0..50 {
            sched.advance(1.0, &mut events);
        }
        assert!(events.is_empty());
        assert_eq!(sched.car_at(2).unwrap().position(), 0.0);
    }

    #[test]
    fn visits_stops_in_order_going_up() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 0..=9, RoomType::Elevator);
        let mut sched = scheduler(&topo, 5);
        let car = sched.car_mut(CarId(0)).unwrap();
        for f in [7, 1, 3] {
            assert!(car.request_stop(f));
        }

        let mut events = Vec::new();
        for _ in 0..500 {
            sched.advance(1.0, &mut events);
            assert_ne!(sched.car(CarId(0)).unwrap().direction(), Direction::Down);
        }
        assert_eq!(arrivals(&events), vec![1, 3, 7]);
        let car = sched.car(CarId(0)).unwrap();
        assert_eq!(car.position(), 7.0);
        assert!(car.is_idle());
        assert!(car.pending().is_empty());
    }

    #[test]
    fn idle_tie_breaks_to_lower_floor() {
        let mut topo = building(12, 5);
        shaft(&mut topo, 2, 0..=11, RoomType::Elevator);
        let mut sched = scheduler(&topo, 3);
        let car = sched.car_mut(CarId(0)).unwrap();
        car.request_stop(7);
        car.request_stop(3);

        let mut events = Vec::new();
        for _ in 0..300 {
            sched.advance(1.0, &mut events);
        }
        assert_eq!(arrivals(&events), vec![3, 7]);
    }

    #[test]
    fn reverses_only_when_nothing_remains_ahead() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 0..=9, RoomType::Elevator);
        let mut sched = scheduler(&topo, 2);
        sched.car_mut(CarId(0)).unwrap().request_stop(6);

        let mut events = Vec::new();
        // Run until the car is above floor 2, then add a stop behind it.
        while sched.car(CarId(0)).unwrap().position() < 2.5 {
            sched.advance(1.0, &mut events);
        }
        let car = sched.car_mut(CarId(0)).unwrap();
        car.request_stop(1);
        car.request_stop(8);
        for _ in 0..400 {
            sched.advance(1.0, &mut events);
        }
        assert_eq!(arrivals(&events), vec![6, 8, 1]);
    }
}

// ── Exchange ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod exchange {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{Passenger, TransitError};

    #[test]
    fn rides_from_lobby_to_destination() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 0..=9, RoomType::Elevator);
        let mut sched = scheduler(&topo, 3);

        let mut events = Vec::new();
        let mut boarded = false;
        for _ in 0..200 {
            if !boarded {
                sched.register([request(1, 0, 4)]);
            }
            sched.advance(1.0, &mut events);
            boarded |= events.iter().any(|e| matches!(e, TransitEvent::Boarded { .. }));
        }

        let exchanges: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, TransitEvent::Boarded { .. } | TransitEvent::Disembarked { .. }))
            .cloned()
            .collect();
        assert_eq!(
            exchanges,
            vec![
                TransitEvent::Boarded { occupant: OccupantId(1), car: CarId(0), column: 2, floor: 0 },
                TransitEvent::Disembarked { occupant: OccupantId(1), car: CarId(0), column: 2, floor: 4 },
            ]
        );
        assert_eq!(sched.car(CarId(0)).unwrap().load(), 0);
    }

    #[test]
    fn board_rejects_beyond_capacity() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 0..=9, RoomType::Elevator);
        let mut sched = scheduler(&topo, 3);
        let car = sched.car_mut(CarId(0)).unwrap();
        for i in 0..8 {
            car.board(Passenger { occupant: OccupantId(i), destination: 3 }).unwrap();
        }
        assert_eq!(
            car.board(Passenger { occupant: OccupantId(99), destination: 3 }),
            Err(TransitError::CapacityExceeded { car: CarId(0), capacity: 8 })
        );
        assert_eq!(car.load(), 8);
    }

    #[test]
    fn load_never_exceeds_capacity() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 0..=9, RoomType::Elevator);
        let mut sched = scheduler(&topo, 4);

        let mut events = Vec::new();
        let mut aboard_or_done: BTreeSet<OccupantId> = BTreeSet::new();
        for _ in 0..3000 {
            let waiting: Vec<RideRequest> = (0..20)
                .filter(|i| !aboard_or_done.contains(&OccupantId(*i)))
                .map(|i| request(i, 0, 5 + (i as i32 % 3)))
                .collect();
            sched.register(waiting);
            events.clear();
            sched.advance(1.0, &mut events);
            for e in &events {
                if let TransitEvent::Boarded { occupant, .. } = e {
                    aboard_or_done.insert(*occupant);
                }
            }
            let car = sched.car(CarId(0)).unwrap();
            assert!(car.load() <= car.capacity());
        }
        assert_eq!(aboard_or_done.len(), 20);
    }

    #[test]
    fn service_car_admits_staff_only() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 0..=9, RoomType::ServiceElevator);
        let mut sched = scheduler(&topo, 3);

        sched.register([request(1, 3, 6)]);
        assert!(sched.car(CarId(0)).unwrap().pending().is_empty());

        sched.register([RideRequest { staff: true, ..request(2, 3, 6) }]);
        assert!(sched.car(CarId(0)).unwrap().pending().contains(&3));
    }

    #[test]
    fn zone_filters_destinations() {
        let mut topo = building(25, 0);
        shaft(&mut topo, 2, 0..=20, RoomType::ExpressElevator);
        let mut sched = scheduler(&topo, 3);

        sched.register([request(1, 0, 5)]);
        assert!(sched.car(CarId(0)).unwrap().pending().is_empty());
        assert!(!sched.car(CarId(0)).unwrap().can_stop_at(5));

        sched.register([request(2, 0, 10)]);
        assert!(sched.car(CarId(0)).unwrap().pending().contains(&0));
    }
}

// ── Resync ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod resync {
    use super::*;
    use crate::Passenger;

    #[test]
    fn removed_shaft_evicts_then_destroys_car() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 0..=9, RoomType::Elevator);
        let mut sched = scheduler(&topo, 3);
        let car = sched.car_mut(CarId(0)).unwrap();
        car.board(Passenger { occupant: OccupantId(4), destination: 8 }).unwrap();
        car.request_stop(8);
        let mut events = Vec::new();
        for _ in 0..12 {
            sched.advance(1.0, &mut events);
        }

        for f in 0..=9 {
            topo.remove(GridPos::new(2, f)).unwrap();
        }
        events.clear();
        sched.resync(&topo, &mut events);

        assert!(sched.is_empty());
        assert!(matches!(
            events[0],
            TransitEvent::Disembarked { occupant: OccupantId(4), column: 2, .. }
        ));
        assert_eq!(
            events[1],
            TransitEvent::CarRemoved { car: CarId(0), column: 2, evicted: 1 }
        );
    }

    #[test]
    fn shortened_shaft_drops_unservable_stops() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 0..=9, RoomType::Elevator);
        let mut sched = scheduler(&topo, 3);
        let car = sched.car_mut(CarId(0)).unwrap();
        car.request_stop(9);
        car.request_stop(4);
        car.board(Passenger { occupant: OccupantId(7), destination: 9 }).unwrap();

        topo.remove(GridPos::new(2, 9)).unwrap();
        let mut events = Vec::new();
        sched.resync(&topo, &mut events);

        let car = sched.car(CarId(0)).unwrap();
        assert_eq!(car.pending().iter().copied().collect::<Vec<_>>(), vec![4]);
        assert_eq!(car.load(), 0);
        assert_eq!(
            events,
            vec![TransitEvent::Disembarked { occupant: OccupantId(7), car: CarId(0), column: 2, floor: 0 }]
        );
    }

    #[test]
    fn stranded_car_snaps_into_shaft() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 0..=9, RoomType::Elevator);
        let mut sched = scheduler(&topo, 3);
        sched.car_mut(CarId(0)).unwrap().request_stop(8);
        let mut events = Vec::new();
        while sched.car(CarId(0)).unwrap().position() < 8.0 {
            sched.advance(1.0, &mut events);
        }

        for f in 6..=9 {
            topo.remove(GridPos::new(2, f)).unwrap();
        }
        sched.resync(&topo, &mut events);
        let car = sched.car(CarId(0)).unwrap();
        assert_eq!(car.position(), 5.0);
        assert!(!car.doors_open());
    }

    #[test]
    fn type_change_replaces_car() {
        let mut topo = building(10, 0);
        shaft(&mut topo, 2, 0..=3, RoomType::Elevator);
        let mut sched = scheduler(&topo, 3);
        for f in 0..=3 {
            topo.remove(GridPos::new(2, f)).unwrap();
        }
        shaft(&mut topo, 2, 0..=3, RoomType::ServiceElevator);
        let mut events = Vec::new();
        sched.resync(&topo, &mut events);
        assert_eq!(
            events,
            vec![
                TransitEvent::CarRemoved { car: CarId(0), column: 2, evicted: 0 },
                TransitEvent::CarAdded { car: CarId(1), column: 2, kind: RoomType::ServiceElevator },
            ]
        );
    }
}
