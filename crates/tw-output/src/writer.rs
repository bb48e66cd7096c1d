//! The `OutputWriter` trait implemented by backend writers.

use crate::{CarSnapshotRow, OutputResult, TickSummaryRow};

/// Errors are returned to the caller; [`TowerOutputObserver`] keeps the
/// first one for [`take_error`].
///
/// [`TowerOutputObserver`]: crate::TowerOutputObserver
/// [`take_error`]: crate::TowerOutputObserver::take_error
pub trait OutputWriter {
    fn write_car_snapshots(&mut self, rows: &[CarSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
