//! Tower observer trait for progress reporting and data collection.

use tw_core::Tick;

use crate::{TickReport, Tower, TowerEvent};

/// Callbacks invoked by [`Tower::run_ticks`][crate::Tower::run_ticks].
///
/// All methods default to no-ops.
///
/// # Example: rollover printer
///
/// ```rust,ignore
/// struct Days;
///
/// impl TowerObserver for Days {
///     fn on_tick_end(&mut self, tower: &Tower, report: &TickReport) {
///         if report.day_rolled_over {
///             println!("{}: {} inside", tower.clock(), report.population);
///         }
///     }
/// }
/// ```
pub trait TowerObserver {
    /// Called before each tick.  `tick` is the counter before the step.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called with the events this tick produced, before `on_tick_end`.
    fn on_events(&mut self, _tick: Tick, _events: &[TowerEvent]) {}

    /// Called after each tick with read-only access to the whole tower.
    fn on_tick_end(&mut self, _tower: &Tower, _report: &TickReport) {}

    /// Called once after the last tick of a run.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`TowerObserver`] that does nothing.
pub struct NoopObserver;

impl TowerObserver for NoopObserver {}
