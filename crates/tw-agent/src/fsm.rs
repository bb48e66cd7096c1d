//! Occupant state machine.
//!
//! Each call to [`advance`] performs at most one state transition.
//!
//! ```text
//! Spawning ─► SeekingTransport ─┬─► WalkingToRoom ─► Arrived ──(new goal)──┐
//!                 ▲             │         │                                 │
//!                 │             │         └─(goal = exit)─► Despawned       │
//!                 │             ├─► WalkingToTransport ─┬─► WaitingForCar ──┼─► Riding
//!                 │             │                       └─► ClimbingStairs  │
//!                 └─────────────┴──(disembark / stairs top / new goal)──────┘
//!
//! SeekingTransport ─(no path)─► Leaving ─► Despawned
//! WaitingForCar ─(patience)───► Leaving
//! ```

use tracing::debug;

use tw_transit::RideRequest;

use crate::config::AgentConfig;
use crate::context::AgentContext;
use crate::event::{AgentEvent, GaveUpReason};
use crate::occupant::{EXIT_X, Goal, Leg, Occupant, OccupantState};
use crate::route::plan_leg;

/// Advance one occupant by one tick.
pub fn advance(
    occ: &mut Occupant,
    config: &AgentConfig,
    ctx: &AgentContext<'_>,
    requests: &mut Vec<RideRequest>,
    events: &mut Vec<AgentEvent>,
) {
    if occ.state == OccupantState::Despawned {
        return;
    }

    if let Some(room) = occ.goal_room() {
        if ctx.topology.room(room).is_none() {
            debug!(occupant = %occ.id, %room, "goal room gone, heading for exit");
            occ.head_for_exit();
            return;
        }
    }

    let walk = config.walk_speed * ctx.motion;
    match occ.state {
        OccupantState::Spawning => {
            occ.state = OccupantState::SeekingTransport;
        }

        OccupantState::SeekingTransport => seek(occ, ctx, events),

        OccupantState::WalkingToTransport => {
            let Some(leg) = occ.leg else {
                occ.state = OccupantState::SeekingTransport;
                return;
            };
            if approach(&mut occ.x, leg.column() as f64, walk) {
                occ.state = match leg {
                    Leg::Car { .. } => {
                        occ.wait_ticks = 0;
                        OccupantState::WaitingForCar
                    }
                    Leg::Stairs { .. } => OccupantState::ClimbingStairs,
                };
            }
        }

        OccupantState::WaitingForCar => wait(occ, config, ctx, requests, events),

        OccupantState::Riding => {}

        OccupantState::ClimbingStairs => {
            let Some(Leg::Stairs { column, to_floor }) = occ.leg else {
                occ.state = OccupantState::SeekingTransport;
                return;
            };
            if !ctx.topology.stairs_connect(column, occ.floor(), to_floor) {
                occ.y = occ.floor() as f64;
                occ.leg = None;
                occ.state = OccupantState::SeekingTransport;
                return;
            }
            if approach(&mut occ.y, to_floor as f64, config.stair_speed * ctx.motion) {
                occ.leg = None;
                occ.state = OccupantState::SeekingTransport;
            }
        }

        OccupantState::WalkingToRoom => {
            let target_x = match occ.goal {
                Goal::Room { x, .. } => x,
                Goal::Exit => EXIT_X,
            };
            if approach(&mut occ.x, target_x, walk) {
                match occ.goal {
                    Goal::Room { room, .. } => {
                        occ.state = OccupantState::Arrived;
                        events.push(AgentEvent::Arrived { occupant: occ.id, kind: occ.kind, room });
                    }
                    Goal::Exit => depart(occ, events),
                }
            }
        }

        OccupantState::Arrived => {
            if occ.kind.is_staff() {
                occ.head_for_exit();
            } else {
                occ.stress = (occ.stress - config.rest_relief).max(0.0);
            }
        }

        OccupantState::Leaving => {
            if approach(&mut occ.x, EXIT_X, walk) {
                depart(occ, events);
            }
        }

        OccupantState::Despawned => {}
    }
}

fn seek(occ: &mut Occupant, ctx: &AgentContext<'_>, events: &mut Vec<AgentEvent>) {
    let target = match occ.goal {
        Goal::Room { floor, .. } => floor,
        Goal::Exit => ctx.lobby_floor(),
    };
    let floor = occ.floor();
    if floor == target {
        occ.y = floor as f64;
        occ.leg = None;
        occ.state = OccupantState::WalkingToRoom;
        return;
    }

    match plan_leg(ctx, occ.x, floor, target, occ.kind.is_staff()) {
        Ok(leg) => {
            occ.leg = Some(leg);
            occ.state = OccupantState::WalkingToTransport;
        }
        Err(failure) => {
            debug!(occupant = %occ.id, %failure, "routing failed");
            give_up(occ, GaveUpReason::NoRoute, events);
        }
    }
}

fn wait(
    occ: &mut Occupant,
    config: &AgentConfig,
    ctx: &AgentContext<'_>,
    requests: &mut Vec<RideRequest>,
    events: &mut Vec<AgentEvent>,
) {
    let Some(Leg::Car { car, to_floor, .. }) = occ.leg else {
        occ.state = OccupantState::SeekingTransport;
        return;
    };
    // Car gone, or its shaft no longer covers this trip.
    let servable = ctx
        .transit
        .car(car)
        .is_some_and(|c| c.serves_trip(occ.floor(), to_floor, occ.kind.is_staff()));
    if !servable {
        debug!(occupant = %occ.id, %car, "car no longer serves trip, re-routing");
        occ.leg = None;
        occ.wait_ticks = 0;
        occ.state = OccupantState::SeekingTransport;
        return;
    }

    occ.wait_ticks += 1;
    occ.stress += config.wait_stress;
    if occ.wait_ticks >= occ.patience {
        occ.stress += config.timeout_stress;
        debug!(occupant = %occ.id, waited = occ.wait_ticks, "patience exhausted");
        give_up(occ, GaveUpReason::Impatient, events);
        return;
    }

    requests.push(RideRequest {
        occupant: occ.id,
        car,
        floor: occ.floor(),
        destination: to_floor,
        staff: occ.kind.is_staff(),
    });
}

fn give_up(occ: &mut Occupant, reason: GaveUpReason, events: &mut Vec<AgentEvent>) {
    occ.goal = Goal::Exit;
    occ.home = None;
    occ.leg = None;
    occ.state = OccupantState::Leaving;
    events.push(AgentEvent::GaveUp { occupant: occ.id, kind: occ.kind, reason });
}

fn depart(occ: &mut Occupant, events: &mut Vec<AgentEvent>) {
    occ.state = OccupantState::Despawned;
    events.push(AgentEvent::Departed { occupant: occ.id, kind: occ.kind });
}

/// Move `pos` toward `target` by at most `step`; `true` once it is there.
fn approach(pos: &mut f64, target: f64, step: f64) -> bool {
    let d = target - *pos;
    if d.abs() <= step {
        *pos = target;
        true
    } else {
        *pos += step * d.signum();
        false
    }
}
