//! `tw-transit`: elevator cars and their dispatch.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`car`]       | `TransitCar` state machine, `Direction`, `Doors`            |
//! | [`scheduler`] | `TransitScheduler`: one car per shaft, resync, requests    |
//! | [`event`]     | `TransitEvent`, `RideRequest`, `CarSnapshot`                |
//! | [`error`]     | `TransitError`, `TransitResult<T>`                          |
//!
//! # Ownership
//!
//! The scheduler owns the cars and never touches occupant records.  Agents
//! talk to it through [`RideRequest`]s; it answers with
//! [`TransitEvent::Boarded`] and [`TransitEvent::Disembarked`], which the
//! agent subsystem applies to its own store.
//!
//! # Dispatch (bounded SCAN)
//!
//! A moving car keeps its direction while a pending stop remains ahead, then
//! reverses.  An idle car heads for the nearest pending stop, ties going to
//! the lower floor.  No randomness is involved anywhere.

pub mod car;
pub mod error;
pub mod event;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use car::{Direction, Doors, Passenger, TransitCar};
pub use error::{TransitError, TransitResult};
pub use event::{CarSnapshot, RideRequest, TransitEvent};
pub use scheduler::{TransitConfig, TransitScheduler};
