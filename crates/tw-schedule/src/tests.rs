//! Unit tests for tw-schedule.

#[cfg(test)]
mod windows {
    use tw_core::OccupantKind;

    use crate::{DailyWindow, ScheduleError, WindowAction, WindowSchedule};

    fn table() -> WindowSchedule {
        WindowSchedule::new(vec![
            DailyWindow::new(600, WindowAction::Outbound, OccupantKind::Visitor),
            DailyWindow::new(420, WindowAction::Inbound, OccupantKind::OfficeWorker),
        ])
        .unwrap()
    }

    #[test]
    fn sorted_by_minute() {
        let s = table();
        assert_eq!(s.windows()[0].minute, 420);
        assert_eq!(s.windows()[1].minute, 600);
    }

    #[test]
    fn fires_once_per_crossing() {
        let mut s = table();
        assert!(s.due(419.9).is_empty());
        let fired = s.due(420.0);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].kind, OccupantKind::OfficeWorker);

        // Still inside the window on later ticks: nothing new.
        for m in 421..600 {
            assert!(s.due(m as f64).is_empty());
        }
        assert_eq!(s.due(600.5).len(), 1);
        assert!(s.due(1439.0).is_empty());
    }

    #[test]
    fn reset_day_rearms() {
        let mut s = table();
        assert_eq!(s.due(700.0).len(), 2);
        assert!(s.due(800.0).is_empty());
        s.reset_day();
        assert!(s.due(0.5).is_empty());
        assert_eq!(s.due(500.0).len(), 1);
    }

    #[test]
    fn catches_up_windows_behind_the_clock() {
        let mut s = WindowSchedule::standard();
        let fired = s.due(8.0 * 60.0);
        let kinds: Vec<_> = fired.iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![OccupantKind::OfficeWorker, OccupantKind::Resident]);
    }

    #[test]
    fn rejects_minute_past_midnight() {
        let err = WindowSchedule::new(vec![DailyWindow::new(
            1440,
            WindowAction::Inbound,
            OccupantKind::Visitor,
        )])
        .unwrap_err();
        assert!(matches!(err, ScheduleError::MinuteOutOfRange(1440)));
    }
}

#[cfg(test)]
mod spawn_queue {
    use tw_core::{OccupantKind, RoomId, Tick};

    use crate::{SpawnOrder, SpawnQueue};

    fn order(room: u32) -> SpawnOrder {
        SpawnOrder { kind: OccupantKind::OfficeWorker, room: RoomId(room) }
    }

    #[test]
    fn drains_everything_due() {
        let mut q = SpawnQueue::new();
        q.push(Tick(5), order(1));
        q.push(Tick(3), order(2));
        q.push(Tick(9), order(3));
        assert_eq!(q.len(), 3);
        assert_eq!(q.next_tick(), Some(Tick(3)));

        assert!(q.drain_due(Tick(2)).is_empty());
        let due = q.drain_due(Tick(5));
        assert_eq!(due, vec![order(2), order(1)]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(9)));
    }

    #[test]
    fn pending_and_cancel_per_room() {
        let mut q = SpawnQueue::new();
        q.push(Tick(1), order(7));
        q.push(Tick(2), order(7));
        q.push(Tick(2), order(8));
        assert_eq!(q.pending_for(RoomId(7)), 2);
        assert_eq!(q.cancel_room(RoomId(7)), 2);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(2)));
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use tw_core::OccupantKind;

    use crate::{load_windows_reader, ScheduleError, WindowAction};

    #[test]
    fn loads_table() {
        let csv = "minute,action,kind\n\
                   1020,outbound,office_worker\n\
                   420,inbound,office_worker\n\
                   660,inbound,visitor\n";
        let s = load_windows_reader(Cursor::new(csv)).unwrap();
        let w = s.windows();
        assert_eq!(w.len(), 3);
        assert_eq!(w[0].minute, 420);
        assert_eq!(w[0].action, WindowAction::Inbound);
        assert_eq!(w[1].kind, OccupantKind::Visitor);
        assert_eq!(w[2].action, WindowAction::Outbound);
    }

    #[test]
    fn bad_action_is_parse_error() {
        let csv = "minute,action,kind\n420,sideways,visitor\n";
        assert!(matches!(
            load_windows_reader(Cursor::new(csv)),
            Err(ScheduleError::Parse(_))
        ));
    }

    #[test]
    fn bad_kind_is_parse_error() {
        let csv = "minute,action,kind\n420,inbound,astronaut\n";
        assert!(matches!(
            load_windows_reader(Cursor::new(csv)),
            Err(ScheduleError::Parse(_))
        ));
    }
}
