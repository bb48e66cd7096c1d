//! `tw-agent`: the people in the tower.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`occupant`]   | `Occupant`, `OccupantState`, `Goal`, `Leg`                 |
//! | [`store`]      | `OccupantStore`: id-ordered occupant records              |
//! | [`context`]    | `AgentContext<'a>`: read-only view of the tick's world    |
//! | [`route`]      | `plan_leg`: direct car, direct stairs, or via the lobby   |
//! | [`fsm`]        | per-occupant state machine step                            |
//! | [`policy`]     | window handling, spawn release, janitor dispatch           |
//! | [`simulation`] | `AgentSimulation`: owner of all of the above              |
//! | [`event`]      | `AgentEvent`, `GaveUpReason`                               |
//! | [`config`]     | `AgentConfig`                                              |
//! | [`error`]      | `RoutingFailure`, `SpawnError`                             |
//!
//! # Tick phases
//!
//! The tower drives the agent subsystem in a fixed order each tick:
//!
//! 1. [`AgentSimulation::apply_windows`] / [`AgentSimulation::release_spawns`] /
//!    [`AgentSimulation::dispatch_janitor`]: spawn and despawn policy.
//! 2. [`AgentSimulation::step`]: every occupant advances at most one
//!    state transition and may emit a `RideRequest`.
//! 3. [`AgentSimulation::apply_transit`]: `Boarded` / `Disembarked` events
//!    from the scheduler are applied to occupant records.
//! 4. [`AgentSimulation::sync_riders`] and [`AgentSimulation::purge`].
//!
//! The scheduler never writes occupant records itself; step 3 is the only
//! place ride state changes hands.

pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod fsm;
pub mod occupant;
pub mod policy;
pub mod route;
pub mod simulation;
pub mod store;

#[cfg(test)]
mod tests;

pub use config::AgentConfig;
pub use context::AgentContext;
pub use error::{RoutingFailure, SpawnError};
pub use event::{AgentEvent, GaveUpReason};
pub use occupant::{Goal, Leg, Occupant, OccupantState};
pub use route::plan_leg;
pub use simulation::AgentSimulation;
pub use store::OccupantStore;
