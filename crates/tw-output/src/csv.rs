//! CSV output backend.
//!
//! Creates two files in the output directory:
//! - `tick_summaries.csv`
//! - `car_snapshots.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CarSnapshotRow, OutputResult, TickSummaryRow};

pub struct CsvWriter {
    summaries: Writer<File>,
    cars:      Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files, and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "day", "minute", "population", "cars", "events"])?;

        let mut cars = Writer::from_path(dir.join("car_snapshots.csv"))?;
        cars.write_record([
            "tick", "car", "column", "position", "direction", "doors_open", "load", "capacity",
        ])?;

        Ok(Self { summaries, cars, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_car_snapshots(&mut self, rows: &[CarSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.cars.write_record(&[
                row.tick.to_string(),
                row.car.to_string(),
                row.column.to_string(),
                format!("{:.3}", row.position),
                row.direction.to_string(),
                (row.doors_open as u8).to_string(),
                row.load.to_string(),
                row.capacity.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.day.to_string(),
            format!("{:.2}", row.minute),
            row.population.to_string(),
            row.cars.to_string(),
            row.events.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.cars.flush()?;
        Ok(())
    }
}
