//! `AgentContext`: read-only snapshot of the world for one agent pass.

use tw_core::Tick;
use tw_topology::Topology;
use tw_transit::TransitScheduler;

/// Shared by every occupant during [`AgentSimulation::step`].  Nothing here
/// is mutated during the pass.
///
/// [`AgentSimulation::step`]: crate::AgentSimulation::step
pub struct AgentContext<'a> {
    pub topology: &'a Topology,
    pub transit:  &'a TransitScheduler,
    /// Per-tick movement factor (delta and game speed folded in).
    pub motion:   f64,
    pub tick:     Tick,
}

impl<'a> AgentContext<'a> {
    pub fn new(topology: &'a Topology, transit: &'a TransitScheduler, motion: f64, tick: Tick) -> Self {
        Self { topology, transit, motion, tick }
    }

    pub fn lobby_floor(&self) -> i32 {
        self.topology.lobby_floor()
    }
}
