//! `tw-schedule`: the daily rhythm of the tower.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`window`]      | `DailyWindow`, `WindowAction`, `WindowSchedule`         |
//! | [`spawn_queue`] | `SpawnQueue` (`BTreeMap<Tick, Vec<SpawnOrder>>`)        |
//! | [`loader`]      | `load_windows_csv`, `load_windows_reader`               |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                    |
//!
//! # Window model
//!
//! A window is a time of day plus an action for one occupant kind.  Windows
//! are edge-triggered: each fires once when the clock first reaches it on a
//! given day, and the whole table is re-armed at day rollover.
//!
//! ```text
//! day rollover      → reset_day()  (every window re-armed)
//! each tick         → due(minute)  (armed windows with w.minute ≤ minute fire)
//! ```
//!
//! Windows already behind the clock when the table is armed fire on the
//! first `due` call, so a simulation started at 08:00 still gets the 07:00
//! arrivals.

pub mod error;
pub mod loader;
pub mod spawn_queue;
pub mod window;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_windows_csv, load_windows_reader};
pub use spawn_queue::{SpawnOrder, SpawnQueue};
pub use window::{DailyWindow, WindowAction, WindowSchedule};
