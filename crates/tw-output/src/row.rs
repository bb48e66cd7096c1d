//! Plain data rows written by output backends.

/// One car at one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarSnapshotRow {
    pub tick:       u64,
    pub car:        u32,
    pub column:     i32,
    /// Continuous floor position.
    pub position:   f64,
    /// `idle`, `up`, or `down`.
    pub direction:  &'static str,
    pub doors_open: bool,
    pub load:       u32,
    pub capacity:   u32,
}

/// Building-wide state after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub day:        u32,
    /// Minute of the day, `[0, 1440)`.
    pub minute:     f64,
    pub population: u64,
    pub cars:       u64,
    /// Events emitted during the tick.
    pub events:     u64,
}
