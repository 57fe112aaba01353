//! Unit tests for vf-schedule.

use vf_core::{PatientId, ProviderId, Tick};

use crate::{DeferredEvent, EventKind, EventQueue, Shift};

#[cfg(test)]
mod event_queue {
    use super::*;

    #[test]
    fn drains_everything_due_in_order() {
        let mut q = EventQueue::new();
        q.schedule(Tick(0), 15, ProviderId(1), EventKind::ReturnFromBreak);
        q.schedule(Tick(0), 5, ProviderId(2), EventKind::TreatmentComplete { patient: PatientId(9) });
        q.schedule(Tick(0), 30, ProviderId(3), EventKind::ReturnFromBreak);
        assert_eq!(q.len(), 3);
        assert_eq!(q.next_tick(), Some(Tick(5)));

        let fired = q.drain_due(Tick(20));
        let due: Vec<Tick> = fired.iter().map(|e| e.due).collect();
        assert_eq!(due, vec![Tick(5), Tick(15)]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(30)));
    }

    #[test]
    fn nothing_due_returns_empty() {
        let mut q = EventQueue::new();
        q.schedule(Tick(10), 1, ProviderId(0), EventKind::ReturnFromBreak);
        assert!(q.drain_due(Tick(10)).is_empty());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn overdue_events_still_fire() {
        let mut q = EventQueue::new();
        q.push(DeferredEvent::new(Tick(3), ProviderId(0), EventKind::ReturnFromBreak));
        let fired = q.drain_due(Tick(100));
        assert_eq!(fired.len(), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn same_tick_keeps_insertion_order() {
        let mut q = EventQueue::new();
        for p in [4, 1, 7] {
            q.schedule(Tick(0), 2, ProviderId(p), EventKind::ReturnFromBreak);
        }
        let order: Vec<u32> = q.drain_due(Tick(2)).iter().map(|e| e.provider.0).collect();
        assert_eq!(order, vec![4, 1, 7]);
    }

    #[test]
    fn pending_for_filters_by_provider() {
        let mut q = EventQueue::new();
        q.schedule(Tick(0), 1, ProviderId(1), EventKind::ReturnFromBreak);
        q.schedule(Tick(0), 2, ProviderId(2), EventKind::ReturnFromBreak);
        q.schedule(Tick(0), 3, ProviderId(1), EventKind::TreatmentComplete { patient: PatientId(0) });
        assert_eq!(q.pending_for(ProviderId(1)).count(), 2);
    }
}

#[cfg(test)]
mod shift {
    use super::*;

    #[test]
    fn day_shift_window() {
        let s = Shift::default();
        assert!(!s.on_shift(7));
        assert!(s.on_shift(8));
        assert!(s.on_shift(16));
        assert!(!s.on_shift(17));
        assert_eq!(s.hours(), 9);
    }

    #[test]
    fn overnight_wraps() {
        let s = Shift::new(22, 6);
        assert!(s.on_shift(23));
        assert!(s.on_shift(0));
        assert!(s.on_shift(5));
        assert!(!s.on_shift(6));
        assert!(!s.on_shift(12));
        assert_eq!(s.hours(), 8);
    }

    #[test]
    fn empty_shift_never_works() {
        let s = Shift::new(9, 9);
        assert!((0..24).all(|h| !s.on_shift(h)));
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{load_shifts_reader, ScheduleError, Shift};

    #[test]
    fn absent_providers_get_day_shift() {
        let csv = "provider_id,shift_start,shift_end\n1,22,6\n";
        let shifts = load_shifts_reader(Cursor::new(csv), 3).unwrap();
        assert_eq!(shifts, vec![Shift::DAY, Shift::new(22, 6), Shift::DAY]);
    }

    #[test]
    fn out_of_range_provider_rejected() {
        let csv = "provider_id,shift_start,shift_end\n5,8,17\n";
        let err = load_shifts_reader(Cursor::new(csv), 3).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidShift { provider: 5, .. }));
    }

    #[test]
    fn bad_hours_rejected() {
        let csv = "provider_id,shift_start,shift_end\n0,25,3\n";
        assert!(load_shifts_reader(Cursor::new(csv), 1).is_err());
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let csv = "provider_id,shift_start,shift_end\nabc,8,17\n";
        let err = load_shifts_reader(Cursor::new(csv), 1).unwrap_err();
        assert!(matches!(err, ScheduleError::Parse(_)));
    }
}
