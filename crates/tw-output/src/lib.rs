//! `tw-output`: simulation output writers for the rust_tower simulation.
//!
//! | Backend | Files created                              |
//! |---------|--------------------------------------------|
//! | CSV     | `tick_summaries.csv`, `car_snapshots.csv`  |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`TowerOutputObserver`], which implements `tw_sim::TowerObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tw_output::{CsvWriter, TowerOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TowerOutputObserver::new(writer, 60);
//! tower.run_ticks(10_000, 16.0, &mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TowerOutputObserver;
pub use row::{CarSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
