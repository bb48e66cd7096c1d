//! Integration tests for tw-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{CarSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn car_row(car: u32, tick: u64) -> CarSnapshotRow {
        CarSnapshotRow {
            tick,
            car,
            column:     car as i32 * 4,
            position:   2.5,
            direction:  "up",
            doors_open: false,
            load:       3,
            capacity:   8,
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow { tick, day: 1, minute: 480.5, population: 7, cars: 2, events: 4 }
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created_in_new_directory() {
        let dir = tmp();
        let out = dir.path().join("nested").join("run");
        let _w = CsvWriter::new(&out).unwrap();
        assert!(out.join("tick_summaries.csv").exists());
        assert!(out.join("car_snapshots.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("tick_summaries.csv")),
            ["tick", "day", "minute", "population", "cars", "events"]
        );
        assert_eq!(
            headers(dir.path().join("car_snapshots.csv")),
            ["tick", "car", "column", "position", "direction", "doors_open", "load", "capacity"]
        );
    }

    #[test]
    fn car_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_car_snapshots(&[car_row(0, 9), car_row(1, 9)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("car_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][1], "1"); // car
        assert_eq!(&rows[1][2], "4"); // column
        assert_eq!(&rows[0][3], "2.500");
        assert_eq!(&rows[0][4], "up");
        assert_eq!(&rows[0][5], "0");
    }

    #[test]
    fn summary_row_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][2], "480.50");
        assert_eq!(&rows[0][3], "7");
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use tw_core::{GridPos, OccupantKind, RoomType};
    use tw_sim::{TowerBuilder, TowerConfig};

    use crate::{CsvWriter, TowerOutputObserver};

    fn record_count(dir: &TempDir, file: &str) -> usize {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().count()
    }

    #[test]
    fn run_writes_summaries_and_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TowerConfig::with_grid(16, 10, 2);
        config.windows = Vec::new();
        let mut tower = TowerBuilder::new(config)
            .column(3, 0, 8, RoomType::Elevator)
            .room(GridPos::new(4, 5), RoomType::Office)
            .build()
            .unwrap();
        let office = tower.topology().room_id_at(GridPos::new(4, 5)).unwrap();
        tower.spawn_occupant(OccupantKind::OfficeWorker, office).unwrap();

        let mut obs = TowerOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), 10);
        tower.run_ticks(100, 16.0, &mut obs);
        assert!(obs.take_error().is_none());

        assert_eq!(record_count(&dir, "tick_summaries.csv"), 100);
        // One car, ticks 10, 20, ..., 100.
        assert_eq!(record_count(&dir, "car_snapshots.csv"), 10);
    }

    #[test]
    fn paused_ticks_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut tower = TowerBuilder::new(TowerConfig::with_grid(8, 4, 0)).build().unwrap();
        tower.pause();

        let mut obs = TowerOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), 0);
        tower.run_ticks(20, 16.0, &mut obs);
        assert!(obs.take_error().is_none());
        assert_eq!(record_count(&dir, "tick_summaries.csv"), 0);
    }
}
