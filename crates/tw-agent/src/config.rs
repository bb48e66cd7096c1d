//! Agent tuning knobs.

/// Per-tick rates are at nominal motion scale (`1.0`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    /// Cells per tick on foot.
    pub walk_speed: f64,
    /// Floors per tick on stairs.
    pub stair_speed: f64,
    /// Waiting ticks before an occupant gives up on a car.
    pub patience: u32,
    /// Stress added per waiting tick.
    pub wait_stress: f32,
    /// Stress added when patience runs out.
    pub timeout_stress: f32,
    /// Stress removed per tick while resting in a room.
    pub rest_relief: f32,
    /// Ticks between queued inbound arrivals.
    pub spawn_interval_ticks: u64,
    /// Dirt level at which a janitor is sent.
    pub dirt_threshold: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            walk_speed:           0.1,
            stair_speed:          0.05,
            patience:             600,
            wait_stress:          0.05,
            timeout_stress:       20.0,
            rest_relief:          0.01,
            spawn_interval_ticks: 30,
            dirt_threshold:       50.0,
        }
    }
}
