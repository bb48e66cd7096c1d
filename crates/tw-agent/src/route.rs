//! Leg planning.
//!
//! Preference order, all deterministic:
//!
//! 1. a car that stops at both floors and admits the occupant, nearest
//!    column first (ties to the lower column);
//! 2. a stair run covering both floors, nearest column first;
//! 3. via the lobby: the first leg down (or up) to the lobby, provided a
//!    second leg from the lobby to the target also exists.
//!
//! Only the next leg is returned.  Occupants re-plan after every hop, so a
//! building that changes mid-journey is picked up naturally.

use tw_transit::TransitCar;

use crate::context::AgentContext;
use crate::error::RoutingFailure;
use crate::occupant::Leg;

/// Plan the next hop from `(x, from)` to floor `to`.
pub fn plan_leg(
    ctx: &AgentContext<'_>,
    x: f64,
    from: i32,
    to: i32,
    staff: bool,
) -> Result<Leg, RoutingFailure> {
    if let Some(leg) = direct_leg(ctx, x, from, to, staff) {
        return Ok(leg);
    }

    let lobby = ctx.lobby_floor();
    if from != lobby && to != lobby {
        if let Some(first) = direct_leg(ctx, x, from, lobby, staff) {
            let lobby_x = first.column() as f64;
            if direct_leg(ctx, lobby_x, lobby, to, staff).is_some() {
                return Ok(first);
            }
        }
    }

    Err(RoutingFailure::NoPath { from, to })
}

fn direct_leg(ctx: &AgentContext<'_>, x: f64, from: i32, to: i32, staff: bool) -> Option<Leg> {
    let car = ctx
        .transit
        .cars()
        .filter(|c| c.serves_trip(from, to, staff))
        .min_by(|a, b| by_distance(x, a.column(), b.column()));
    if let Some(car) = car {
        return Some(car_leg(car, to));
    }

    ctx.topology
        .stair_columns(from)
        .filter(|column| ctx.topology.stairs_connect(*column, from, to))
        .min_by(|a, b| by_distance(x, *a, *b))
        .map(|column| Leg::Stairs { column, to_floor: to })
}

fn car_leg(car: &TransitCar, to: i32) -> Leg {
    Leg::Car { car: car.id(), column: car.column(), to_floor: to }
}

fn by_distance(x: f64, a: i32, b: i32) -> std::cmp::Ordering {
    let da = (a as f64 - x).abs();
    let db = (b as f64 - x).abs();
    da.total_cmp(&db).then(a.cmp(&b))
}
