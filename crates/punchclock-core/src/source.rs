//! Seams to the collaborators outside the core: the event store and the
//! clock.
//!
//! Every computation runs on a [`Snapshot`], a value copy of the log
//! taken together with the current time. Changes to the store after the
//! snapshot is taken are never observed by that computation.

use chrono::Utc;
use serde::Serialize;

use crate::aggregate::{Aggregation, aggregate_events};
use crate::models::{AggregateOptions, PunchEvent, Shift};
use crate::reconstruct::{StatusReport, current_status, reconstruct};

/// Read access to a punch log.
pub trait EventSource {
    /// All events currently in the log, in any order.
    fn list(&self) -> Vec<PunchEvent>;
}

impl EventSource for [PunchEvent] {
    fn list(&self) -> Vec<PunchEvent> {
        self.to_vec()
    }
}

impl EventSource for Vec<PunchEvent> {
    fn list(&self) -> Vec<PunchEvent> {
        self.clone()
    }
}

/// Source of the current time.
pub trait Clock {
    /// Current time as epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// The punch log and the time, captured together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub events: Vec<PunchEvent>,
    pub taken_at_ms: i64,
}

impl Snapshot {
    pub fn take<S, C>(source: &S, clock: &C) -> Self
    where
        S: EventSource + ?Sized,
        C: Clock + ?Sized,
    {
        Self {
            events: source.list(),
            taken_at_ms: clock.now_ms(),
        }
    }

    pub fn shifts(&self) -> Vec<Shift> {
        reconstruct(&self.events)
    }

    pub fn aggregate(&self, options: &AggregateOptions) -> Aggregation {
        aggregate_events(&self.events, self.taken_at_ms, options)
    }

    pub fn status(&self) -> StatusReport {
        current_status(&self.events, self.taken_at_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClockStatus, PunchKind};

    const H: i64 = 3_600_000;

    #[test]
    fn snapshot_is_a_copy() {
        let mut log = vec![
            PunchEvent::new("1", PunchKind::ClockIn, 0),
            PunchEvent::new("2", PunchKind::ClockOut, 2 * H),
        ];
        let snapshot = Snapshot::take(&log, &FixedClock(3 * H));
        log.push(PunchEvent::new("3", PunchKind::ClockIn, 4 * H));

        assert_eq!(snapshot.events.len(), 2);
        assert_eq!(snapshot.taken_at_ms, 3 * H);
        assert_eq!(snapshot.status().status, ClockStatus::Off);
        assert_eq!(snapshot.shifts().len(), 1);
    }

    #[test]
    fn slice_source() {
        let events = [PunchEvent::new("1", PunchKind::ClockIn, 0)];
        let snapshot = Snapshot::take(&events[..], &FixedClock(H));
        assert_eq!(snapshot.status().worked_hours_so_far, 1.0);
        assert!(snapshot.aggregate(&AggregateOptions::default()).days.is_empty());
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
