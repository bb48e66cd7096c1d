//! CSV window-table loader.
//!
//! # CSV format
//!
//! One row per window.  `minute` is the minute of the day (`0..1440`),
//! `action` is `inbound` or `outbound`, `kind` is an occupant kind name.
//!
//! ```csv
//! minute,action,kind
//! 420,inbound,office_worker
//! 660,inbound,visitor
//! 780,outbound,visitor
//! 1020,outbound,office_worker
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tw_core::OccupantKind;

use crate::window::{DailyWindow, WindowAction, WindowSchedule};
use crate::ScheduleError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WindowRecord {
    minute: u32,
    action: String,
    kind:   String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`WindowSchedule`] from a CSV file.
pub fn load_windows_csv(path: &Path) -> Result<WindowSchedule, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_windows_reader(file)
}

/// Like [`load_windows_csv`] but accepts any `Read` source.
pub fn load_windows_reader<R: Read>(reader: R) -> Result<WindowSchedule, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut windows = Vec::new();

    for result in csv_reader.deserialize::<WindowRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let kind = row
            .kind
            .parse::<OccupantKind>()
            .map_err(|e| ScheduleError::Parse(e.to_string()))?;
        windows.push(DailyWindow::new(row.minute, parse_action(&row.action)?, kind));
    }

    WindowSchedule::new(windows)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_action(s: &str) -> Result<WindowAction, ScheduleError> {
    match s.trim() {
        "inbound" => Ok(WindowAction::Inbound),
        "outbound" => Ok(WindowAction::Outbound),
        other => Err(ScheduleError::Parse(format!(
            "invalid action {other:?}: expected \"inbound\" or \"outbound\""
        ))),
    }
}
