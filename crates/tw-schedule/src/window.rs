//! Daily inbound/outbound windows.

use std::fmt;

use tracing::debug;

use tw_core::{MINUTES_PER_DAY, OccupantKind};

use crate::{ScheduleError, ScheduleResult};

/// What a window does to its occupant kind.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowAction {
    /// Fill rooms of the kind's type that have free capacity.
    Inbound,
    /// Send resting occupants of the kind to the exit.
    Outbound,
}

impl fmt::Display for WindowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WindowAction::Inbound  => "inbound",
            WindowAction::Outbound => "outbound",
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyWindow {
    /// Minute of the day at which the window opens, `0..1440`.
    pub minute: u32,
    pub action: WindowAction,
    pub kind:   OccupantKind,
}

impl DailyWindow {
    pub const fn new(minute: u32, action: WindowAction, kind: OccupantKind) -> Self {
        Self { minute, action, kind }
    }
}

// ── WindowSchedule ────────────────────────────────────────────────────────────

/// The day's window table with one fired flag per window.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSchedule {
    windows: Vec<DailyWindow>,
    fired:   Vec<bool>,
}

impl WindowSchedule {
    /// Build a schedule, sorted by minute (stable for equal minutes).
    pub fn new(mut windows: Vec<DailyWindow>) -> ScheduleResult<Self> {
        if let Some(bad) = windows.iter().find(|w| w.minute as f64 >= MINUTES_PER_DAY) {
            return Err(ScheduleError::MinuteOutOfRange(bad.minute));
        }
        windows.sort_by_key(|w| w.minute);
        let fired = vec![false; windows.len()];
        Ok(Self { windows, fired })
    }

    /// The stock day:
    ///
    /// | Time  | Action   | Kind          |
    /// |-------|----------|---------------|
    /// | 07:00 | inbound  | office worker |
    /// | 07:00 | inbound  | resident      |
    /// | 10:00 | outbound | hotel guest   |
    /// | 11:00 | inbound  | visitor       |
    /// | 13:00 | outbound | visitor       |
    /// | 15:00 | inbound  | hotel guest   |
    /// | 17:00 | outbound | office worker |
    pub fn standard() -> Self {
        use OccupantKind::*;
        use WindowAction::*;
        let windows = vec![
            DailyWindow::new(7 * 60, Inbound, OfficeWorker),
            DailyWindow::new(7 * 60, Inbound, Resident),
            DailyWindow::new(10 * 60, Outbound, HotelGuest),
            DailyWindow::new(11 * 60, Inbound, Visitor),
            DailyWindow::new(13 * 60, Outbound, Visitor),
            DailyWindow::new(15 * 60, Inbound, HotelGuest),
            DailyWindow::new(17 * 60, Outbound, OfficeWorker),
        ];
        let fired = vec![false; windows.len()];
        Self { windows, fired }
    }

    pub fn empty() -> Self {
        Self { windows: Vec::new(), fired: Vec::new() }
    }

    pub fn windows(&self) -> &[DailyWindow] {
        &self.windows
    }

    /// Re-arm every window.  Called once per day rollover.
    pub fn reset_day(&mut self) {
        self.fired.fill(false);
    }

    /// Fire every armed window whose time has been reached, in table order.
    /// A window fires at most once between two `reset_day` calls.
    pub fn due(&mut self, minute: f64) -> Vec<DailyWindow> {
        let mut out = Vec::new();
        for (window, fired) in self.windows.iter().zip(self.fired.iter_mut()) {
            if !*fired && window.minute as f64 <= minute {
                *fired = true;
                debug!(minute = window.minute, action = %window.action, kind = %window.kind, "window fired");
                out.push(*window);
            }
        }
        out
    }
}

impl Default for WindowSchedule {
    fn default() -> Self {
        Self::standard()
    }
}
