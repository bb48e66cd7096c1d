//! Unit tests for tw-agent.

use tw_core::{CarId, Catalog, GridPos, GridSize, OccupantId, OccupantKind, RoomId, RoomType, SimRng, Tick};
use tw_schedule::{DailyWindow, WindowAction};
use tw_topology::Topology;
use tw_transit::{TransitConfig, TransitEvent, TransitScheduler};

use crate::{
    AgentConfig, AgentContext, AgentEvent, AgentSimulation, GaveUpReason, Goal, Leg, Occupant,
    OccupantState, RoutingFailure, SpawnError, plan_leg,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const LOBBY: i32 = 0;

/// 12 wide, 8 tall, lobby on floor 0, an elevator in column 2 up to floor 6
/// and an office beside it on floor 5.
fn building() -> (Topology, RoomId) {
    let mut topo = Topology::new(GridSize::new(12, 8), LOBBY, Catalog::standard(LOBBY, 8)).unwrap();
    for f in 0..=6 {
        topo.place(GridPos::new(2, f), RoomType::Elevator).unwrap();
    }
    let office = topo.place(GridPos::new(3, 5), RoomType::Office).unwrap();
    topo.recompute_connectivity();
    (topo, office)
}

fn scheduler(topo: &Topology) -> TransitScheduler {
    let mut sched = TransitScheduler::new(TransitConfig { dwell_ticks: 3, ..TransitConfig::default() });
    sched.resync(topo, &mut Vec::new());
    sched
}

fn sim(config: AgentConfig) -> AgentSimulation {
    AgentSimulation::new(config, SimRng::new(7))
}

/// One tick of the agent and transit phases, in tower order.
fn tick(
    sim: &mut AgentSimulation,
    topo: &Topology,
    sched: &mut TransitScheduler,
    now: Tick,
) -> (Vec<AgentEvent>, Vec<TransitEvent>) {
    let mut agent_events = Vec::new();
    let mut transit_events = Vec::new();
    let requests = {
        let ctx = AgentContext::new(topo, sched, 1.0, now);
        sim.step(&ctx, &mut agent_events)
    };
    sched.register(requests);
    sched.advance(1.0, &mut transit_events);
    sim.apply_transit(&transit_events);
    sim.sync_riders(sched);
    sim.purge();
    (agent_events, transit_events)
}

fn rider_invariant_holds(sim: &AgentSimulation) -> bool {
    sim.occupants()
        .iter()
        .all(|o| (o.state == OccupantState::Riding) == o.car.is_some())
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawning {
    use super::*;

    #[test]
    fn spawn_places_occupant_at_entrance() {
        let (topo, office) = building();
        let mut sim = sim(AgentConfig::default());
        let mut events = Vec::new();
        let id = sim.spawn(OccupantKind::OfficeWorker, office, &topo, &mut events).unwrap();

        let occ = sim.occupant(id).unwrap();
        assert_eq!(occ.state, OccupantState::Spawning);
        assert_eq!((occ.x, occ.floor()), (0.0, LOBBY));
        assert_eq!(occ.home, Some(office));
        assert_eq!(occ.goal, Goal::Room { room: office, x: 3.5, floor: 5 });
        assert_eq!(
            events,
            vec![AgentEvent::Spawned { occupant: id, kind: OccupantKind::OfficeWorker, room: office }]
        );
    }

    #[test]
    fn spawn_rejections() {
        let (mut topo, office) = building();
        let far = topo.place(GridPos::new(8, 3), RoomType::Office).unwrap();
        topo.recompute_connectivity();
        let mut sim = sim(AgentConfig::default());
        let mut events = Vec::new();

        assert_eq!(
            sim.spawn(OccupantKind::OfficeWorker, RoomId(999), &topo, &mut events),
            Err(SpawnError::UnknownRoom(RoomId(999)))
        );
        assert_eq!(
            sim.spawn(OccupantKind::OfficeWorker, far, &topo, &mut events),
            Err(SpawnError::NotConnected(far))
        );
        assert_eq!(
            sim.spawn(OccupantKind::Resident, office, &topo, &mut events),
            Err(SpawnError::WrongRoomType { kind: OccupantKind::Resident, room_type: RoomType::Office })
        );

        for _ in 0..6 {
            sim.spawn(OccupantKind::OfficeWorker, office, &topo, &mut events).unwrap();
        }
        assert_eq!(
            sim.spawn(OccupantKind::OfficeWorker, office, &topo, &mut events),
            Err(SpawnError::RoomFull(office))
        );
        assert_eq!(sim.population(), 6);
    }

    #[test]
    fn send_to_exit_unknown_occupant() {
        let mut sim = sim(AgentConfig::default());
        assert_eq!(sim.send_to_exit(OccupantId(3)), Err(SpawnError::UnknownOccupant(OccupantId(3))));
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use super::*;

    #[test]
    fn car_preferred_over_nearer_stairs() {
        let (mut topo, _) = building();
        for f in 0..=6 {
            topo.place(GridPos::new(10, f), RoomType::Stairs).unwrap();
        }
        let sched = scheduler(&topo);
        let ctx = AgentContext::new(&topo, &sched, 1.0, Tick::ZERO);
        assert_eq!(
            plan_leg(&ctx, 9.0, LOBBY, 5, false),
            Ok(Leg::Car { car: CarId(0), column: 2, to_floor: 5 })
        );
        // Stairs carry the trip the car cannot make.
        assert_eq!(plan_leg(&ctx, 9.0, 6, 7, false), Err(RoutingFailure::NoPath { from: 6, to: 7 }));
        topo.place(GridPos::new(10, 7), RoomType::Stairs).unwrap();
        let ctx = AgentContext::new(&topo, &sched, 1.0, Tick::ZERO);
        assert_eq!(plan_leg(&ctx, 9.0, 6, 7, false), Ok(Leg::Stairs { column: 10, to_floor: 7 }));
    }

    #[test]
    fn nearest_car_wins() {
        let (mut topo, _) = building();
        for f in 0..=6 {
            topo.place(GridPos::new(9, f), RoomType::Elevator).unwrap();
        }
        let sched = scheduler(&topo);
        let ctx = AgentContext::new(&topo, &sched, 1.0, Tick::ZERO);
        assert_eq!(plan_leg(&ctx, 7.0, LOBBY, 4, false).map(|l| l.column()), Ok(9));
        assert_eq!(plan_leg(&ctx, 4.0, LOBBY, 4, false).map(|l| l.column()), Ok(2));
    }

    #[test]
    fn transfer_through_lobby() {
        let lobby = 2;
        let mut topo = Topology::new(GridSize::new(12, 8), lobby, Catalog::standard(lobby, 8)).unwrap();
        for f in 0..=2 {
            topo.place(GridPos::new(2, f), RoomType::Elevator).unwrap();
        }
        for f in 2..=6 {
            topo.place(GridPos::new(8, f), RoomType::Elevator).unwrap();
        }
        let sched = scheduler(&topo);
        let ctx = AgentContext::new(&topo, &sched, 1.0, Tick::ZERO);
        assert_eq!(plan_leg(&ctx, 2.0, 0, 5, false), Ok(Leg::Car { car: CarId(0), column: 2, to_floor: 2 }));
    }

    #[test]
    fn service_car_refuses_guests() {
        let mut topo = Topology::new(GridSize::new(12, 8), LOBBY, Catalog::standard(LOBBY, 8)).unwrap();
        for f in 0..=6 {
            topo.place(GridPos::new(2, f), RoomType::ServiceElevator).unwrap();
        }
        let sched = scheduler(&topo);
        let ctx = AgentContext::new(&topo, &sched, 1.0, Tick::ZERO);
        assert!(plan_leg(&ctx, 0.0, LOBBY, 4, false).is_err());
        assert!(plan_leg(&ctx, 0.0, LOBBY, 4, true).is_ok());
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod fsm {
    use super::*;

    fn waiting_occupant(sim: &mut AgentSimulation, room: RoomId) -> OccupantId {
        let id = sim.occupants.allocate_id();
        let mut occ = Occupant::new(
            id,
            OccupantKind::OfficeWorker,
            (2.0, LOBBY),
            Goal::Room { room, x: 3.5, floor: 5 },
            Some(room),
            sim.config.patience,
        );
        occ.state = OccupantState::WaitingForCar;
        occ.leg = Some(Leg::Car { car: CarId(0), column: 2, to_floor: 5 });
        sim.occupants.insert(occ);
        id
    }

    #[test]
    fn patience_runs_out_on_exact_tick() {
        let (topo, office) = building();
        let sched = scheduler(&topo);
        let mut sim = sim(AgentConfig { patience: 5, ..AgentConfig::default() });
        let id = waiting_occupant(&mut sim, office);

        let ctx = AgentContext::new(&topo, &sched, 1.0, Tick::ZERO);
        let mut events = Vec::new();
        for _ in 0..4 {
            let requests = sim.step(&ctx, &mut events);
            assert_eq!(requests.len(), 1);
        }
        assert_eq!(sim.occupant(id).unwrap().state, OccupantState::WaitingForCar);

        let requests = sim.step(&ctx, &mut events);
        assert!(requests.is_empty());
        let occ = sim.occupant(id).unwrap();
        assert_eq!(occ.state, OccupantState::Leaving);
        assert_eq!(occ.goal, Goal::Exit);
        assert!(occ.stress >= AgentConfig::default().timeout_stress);
        assert_eq!(
            events,
            vec![AgentEvent::GaveUp {
                occupant: id,
                kind: OccupantKind::OfficeWorker,
                reason: GaveUpReason::Impatient,
            }]
        );
    }

    #[test]
    fn no_route_gives_up_and_walks_out() {
        let (topo, office) = building();
        let empty = TransitScheduler::default();
        let mut sim = sim(AgentConfig::default());
        let mut events = Vec::new();
        let id = sim.spawn(OccupantKind::OfficeWorker, office, &topo, &mut events).unwrap();

        let ctx = AgentContext::new(&topo, &empty, 1.0, Tick::ZERO);
        for _ in 0..2 {
            sim.step(&ctx, &mut events);
        }
        assert_eq!(sim.occupant(id).unwrap().state, OccupantState::Leaving);
        assert!(events.contains(&AgentEvent::GaveUp {
            occupant: id,
            kind: OccupantKind::OfficeWorker,
            reason: GaveUpReason::NoRoute,
        }));

        // One cell of walking at 0.1 per tick.
        for _ in 0..20 {
            sim.step(&ctx, &mut events);
        }
        assert_eq!(sim.purge(), vec![id]);
        assert!(events.contains(&AgentEvent::Departed { occupant: id, kind: OccupantKind::OfficeWorker }));
    }

    #[test]
    fn round_trip_through_the_elevator() {
        let (topo, office) = building();
        let mut sched = scheduler(&topo);
        let mut sim = sim(AgentConfig::default());
        let id = sim.spawn(OccupantKind::OfficeWorker, office, &topo, &mut Vec::new()).unwrap();

        let mut boarded = false;
        let mut arrived = false;
        for t in 0..500 {
            let (agent, transit) = tick(&mut sim, &topo, &mut sched, Tick(t));
            assert!(rider_invariant_holds(&sim));
            boarded |= transit.iter().any(|e| matches!(e, TransitEvent::Boarded { occupant, .. } if *occupant == id));
            if agent.iter().any(|e| matches!(e, AgentEvent::Arrived { .. })) {
                arrived = true;
                break;
            }
        }
        assert!(boarded && arrived);
        let occ = sim.occupant(id).unwrap();
        assert_eq!((occ.x, occ.floor()), (3.5, 5));
        assert!(occ.is_resting_in(office));

        sim.send_to_exit(id).unwrap();
        let mut departed = false;
        for t in 500..1000 {
            let (agent, _) = tick(&mut sim, &topo, &mut sched, Tick(t));
            assert!(rider_invariant_holds(&sim));
            if agent.iter().any(|e| matches!(e, AgentEvent::Departed { .. })) {
                departed = true;
                break;
            }
        }
        assert!(departed);
        assert_eq!(sim.population(), 0);
    }

    #[test]
    fn car_removal_sends_waiters_back_to_routing() {
        let (_, office) = building();
        let mut sim = sim(AgentConfig::default());
        let id = waiting_occupant(&mut sim, office);
        sim.apply_transit(&[TransitEvent::CarRemoved { car: CarId(0), column: 2, evicted: 0 }]);
        let occ = sim.occupant(id).unwrap();
        assert_eq!(occ.state, OccupantState::SeekingTransport);
        assert_eq!(occ.leg, None);
    }

    #[test]
    fn shortened_shaft_sends_waiter_to_another_car() {
        let (mut topo, office) = building();
        for f in 0..=6 {
            topo.place(GridPos::new(9, f), RoomType::Elevator).unwrap();
        }
        topo.recompute_connectivity();
        let mut sched = scheduler(&topo);
        let near = sched.cars().find(|c| c.column() == 2).unwrap().id();
        let far = sched.cars().find(|c| c.column() == 9).unwrap().id();

        let mut sim = sim(AgentConfig::default());
        let id = waiting_occupant(&mut sim, office);
        sim.occupants.get_mut(id).unwrap().leg = Some(Leg::Car { car: near, column: 2, to_floor: 5 });

        // Cut column 2 below the destination; its car survives but stops short.
        topo.remove(GridPos::new(2, 5)).unwrap();
        topo.recompute_connectivity();
        sched.resync(&topo, &mut Vec::new());
        assert!(sched.car(near).is_some());

        let ctx = AgentContext::new(&topo, &sched, 1.0, Tick::ZERO);
        let mut events = Vec::new();
        let requests = sim.step(&ctx, &mut events);
        assert!(requests.is_empty());
        let occ = sim.occupant(id).unwrap();
        assert_eq!(occ.state, OccupantState::SeekingTransport);
        assert_eq!((occ.leg, occ.wait_ticks), (None, 0));

        sim.step(&ctx, &mut events);
        let occ = sim.occupant(id).unwrap();
        assert_eq!(occ.state, OccupantState::WalkingToTransport);
        assert_eq!(occ.leg, Some(Leg::Car { car: far, column: 9, to_floor: 5 }));
        assert!(events.is_empty());
    }

    #[test]
    fn disembark_clears_ride_state() {
        let (_, office) = building();
        let mut sim = sim(AgentConfig::default());
        let id = waiting_occupant(&mut sim, office);
        sim.apply_transit(&[TransitEvent::Boarded { occupant: id, car: CarId(0), column: 2, floor: LOBBY }]);
        assert_eq!(sim.occupant(id).unwrap().car, Some(CarId(0)));
        assert!(rider_invariant_holds(&sim));

        sim.apply_transit(&[TransitEvent::Disembarked { occupant: id, car: CarId(0), column: 2, floor: 5 }]);
        let occ = sim.occupant(id).unwrap();
        assert_eq!(occ.car, None);
        assert_eq!((occ.x, occ.floor()), (2.0, 5));
        assert_eq!(occ.state, OccupantState::SeekingTransport);
        assert!(rider_invariant_holds(&sim));
    }
}

// ── Policy ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod policy {
    use super::*;

    #[test]
    fn inbound_window_fills_free_slots_once() {
        let (topo, office) = building();
        let mut sim = sim(AgentConfig { spawn_interval_ticks: 10, ..AgentConfig::default() });
        let window = DailyWindow::new(420, WindowAction::Inbound, OccupantKind::OfficeWorker);

        sim.apply_windows(&[window], &topo, Tick(100));
        assert_eq!(sim.queued_spawns(), 6);
        // A second firing finds every slot spoken for.
        sim.apply_windows(&[window], &topo, Tick(100));
        assert_eq!(sim.queued_spawns(), 6);

        let mut events = Vec::new();
        sim.release_spawns(&topo, Tick(120), &mut events);
        assert_eq!(sim.population(), 3);
        sim.release_spawns(&topo, Tick(200), &mut events);
        assert_eq!(sim.population(), 6);
        assert!(events.iter().all(|e| matches!(e, AgentEvent::Spawned { room, .. } if *room == office)));
    }

    #[test]
    fn outbound_window_sends_resting_occupants_home() {
        let (topo, office) = building();
        let mut sim = sim(AgentConfig::default());
        let mut events = Vec::new();
        let resting = sim.spawn(OccupantKind::OfficeWorker, office, &topo, &mut events).unwrap();
        let walking = sim.spawn(OccupantKind::OfficeWorker, office, &topo, &mut events).unwrap();
        if let Some(occ) = sim.occupants.get_mut(resting) {
            occ.state = OccupantState::Arrived;
        }

        let window = DailyWindow::new(1020, WindowAction::Outbound, OccupantKind::OfficeWorker);
        sim.apply_windows(&[window], &topo, Tick(0));
        assert_eq!(sim.occupant(resting).unwrap().goal, Goal::Exit);
        assert_eq!(sim.occupant(resting).unwrap().home, None);
        assert!(matches!(sim.occupant(walking).unwrap().goal, Goal::Room { .. }));
    }

    #[test]
    fn cancelled_room_drops_queued_arrivals() {
        let (topo, office) = building();
        let mut sim = sim(AgentConfig::default());
        let window = DailyWindow::new(420, WindowAction::Inbound, OccupantKind::OfficeWorker);
        sim.apply_windows(&[window], &topo, Tick(0));
        sim.forget_room(office);
        assert_eq!(sim.queued_spawns(), 0);
    }

    #[test]
    fn janitor_goes_to_dirtiest_room() {
        let (mut topo, office) = building();
        let other = topo.place(GridPos::new(3, 4), RoomType::Food).unwrap();
        topo.recompute_connectivity();
        let mut sim = sim(AgentConfig::default());
        let mut events = Vec::new();

        assert_eq!(sim.dispatch_janitor(&topo, &mut events), None);

        topo.room_mut(office).unwrap().dirt = 60.0;
        topo.room_mut(other).unwrap().dirt = 80.0;
        assert_eq!(sim.dispatch_janitor(&topo, &mut events), Some(other));
        // Only one janitor on duty at a time.
        assert_eq!(sim.dispatch_janitor(&topo, &mut events), None);

        let janitor = sim.occupants().iter().find(|o| o.kind == OccupantKind::Janitor).unwrap();
        assert_eq!(janitor.home, None);
        assert_eq!(janitor.goal_room(), Some(other));
    }
}
