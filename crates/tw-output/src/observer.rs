//! `TowerOutputObserver<W>`: bridges `TowerObserver` to an `OutputWriter`.

use tw_core::Tick;
use tw_sim::{TickReport, Tower, TowerObserver};
use tw_transit::CarSnapshot;

use crate::row::{CarSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Writes one summary row per unpaused tick, and every car every
/// `snapshot_interval` ticks (`0` disables car snapshots).
///
/// Observer methods cannot fail, so the first write error is stored; check
/// it with [`take_error`][Self::take_error] after the run.
pub struct TowerOutputObserver<W: OutputWriter> {
    writer:            W,
    snapshot_interval: u64,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> TowerOutputObserver<W> {
    pub fn new(writer: W, snapshot_interval: u64) -> Self {
        Self { writer, snapshot_interval, last_error: None }
    }

    /// The first stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

fn car_row(tick: Tick, car: &CarSnapshot) -> CarSnapshotRow {
    CarSnapshotRow {
        tick:       tick.0,
        car:        car.id.0,
        column:     car.shaft_x,
        position:   car.position,
        direction:  car.direction.as_str(),
        doors_open: car.doors_open,
        load:       car.load as u32,
        capacity:   car.capacity as u32,
    }
}

impl<W: OutputWriter> TowerObserver for TowerOutputObserver<W> {
    fn on_tick_end(&mut self, tower: &Tower, report: &TickReport) {
        if report.paused {
            return;
        }
        let clock = tower.clock();
        let row = TickSummaryRow {
            tick:       report.tick.0,
            day:        clock.day(),
            minute:     clock.minute(),
            population: report.population as u64,
            cars:       tower.transit().len() as u64,
            events:     report.events as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);

        if self.snapshot_interval > 0 && report.tick.0.is_multiple_of(self.snapshot_interval) {
            let rows: Vec<CarSnapshotRow> =
                tower.query_cars().iter().map(|car| car_row(report.tick, car)).collect();
            if !rows.is_empty() {
                let result = self.writer.write_car_snapshots(&rows);
                self.store_err(result);
            }
        }
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
