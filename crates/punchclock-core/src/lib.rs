//! # punchclock-core
//!
//! Shift reconstruction and duration statistics for punch-clock logs.
//!
//! A punch log is an unordered list of clock-in, break-start, break-end
//! and clock-out events. This library replays it into closed work shifts
//! and aggregates them into per-day worked, night, break and overtime
//! hours plus weekly, monthly and today summaries.
//!
//! ## Features
//!
//! - **Total replay**: every `(state, punch)` combination has a defined
//!   outcome; malformed sequences are ignored, never reported as errors.
//! - **Exact arithmetic**: durations come from interval clipping in
//!   milliseconds, not sampling.
//! - **Fixed reference zone**: dates and hour windows are evaluated in a
//!   configurable IANA zone (`Asia/Tokyo` by default), independent of the
//!   machine's local zone, DST-safe via chrono-tz.
//! - **Snapshot semantics**: computations run on a value copy of the log
//!   and the clock reading taken with it.
//!
//! ## Example
//!
//! ```rust
//! use punchclock_core::prelude::*;
//!
//! let h = 3_600_000;
//! let events = vec![
//!     PunchEvent::new("1", PunchKind::ClockIn, 0),
//!     PunchEvent::new("2", PunchKind::BreakStart, 3 * h),
//!     PunchEvent::new("3", PunchKind::BreakEnd, 3 * h + h / 2),
//!     PunchEvent::new("4", PunchKind::ClockOut, 9 * h),
//! ];
//!
//! let snapshot = Snapshot::take(&events, &FixedClock(10 * h));
//! let aggregation = snapshot.aggregate(&AggregateOptions::default());
//!
//! assert_eq!(aggregation.summary.today.total, 8.5);
//! assert_eq!(format_duration(aggregation.summary.today.total), "8h 30m");
//! ```

pub mod aggregate;
pub mod error;
pub mod format;
pub mod interval;
pub mod models;
pub mod parse;
pub mod reconstruct;
pub mod report;
pub mod source;
pub mod tz;

// Re-export commonly used types at the crate root
pub use aggregate::{Aggregation, aggregate, aggregate_events};
pub use error::{PunchclockError, Result};
pub use format::format_duration;
pub use models::{
    AggregateOptions, BreakInterval, ClockStatus, DayBucket, LimitStatus, Profile, PunchEvent,
    PunchKind, Shift, SortOrder, Summary, TodayBreakdown, VisaType,
};
pub use reconstruct::{Replay, StatusReport, current_status, reconstruct, replay};
pub use report::{MonthlyReport, ReportTotals};
pub use source::{Clock, EventSource, FixedClock, Snapshot, SystemClock};

/// Prelude module for convenient imports.
///
/// ```
/// use punchclock_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregate::{Aggregation, aggregate, aggregate_events};
    pub use crate::error::{PunchclockError, Result};
    pub use crate::format::format_duration;
    pub use crate::models::*;
    pub use crate::parse::{parse_date, parse_month, parse_timestamp_auto};
    pub use crate::reconstruct::{StatusReport, current_status, reconstruct, replay};
    pub use crate::report::MonthlyReport;
    pub use crate::source::{Clock, EventSource, FixedClock, Snapshot, SystemClock};
    pub use crate::tz::parse_tz;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn tokyo_ms(d: u32, hh: u32, mm: u32) -> i64 {
        chrono_tz::Asia::Tokyo
            .with_ymd_and_hms(2026, 3, d, hh, mm, 0)
            .single()
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn full_workflow_day_shift() {
        let events = vec![
            PunchEvent::new("a", PunchKind::ClockIn, tokyo_ms(9, 9, 0)),
            PunchEvent::new("b", PunchKind::BreakStart, tokyo_ms(9, 12, 0)),
            PunchEvent::new("c", PunchKind::BreakEnd, tokyo_ms(9, 12, 30)),
            PunchEvent::new("d", PunchKind::ClockOut, tokyo_ms(9, 18, 0)),
        ];
        let snapshot = Snapshot::take(&events, &FixedClock(tokyo_ms(9, 21, 0)));
        let aggregation = snapshot.aggregate(&AggregateOptions::default());

        let bucket = aggregation
            .bucket(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap())
            .unwrap();
        assert_eq!(format_duration(bucket.worked_hours), "8h 30m");
        assert_eq!(format_duration(bucket.break_hours), "0h 30m");
        assert_eq!(format_duration(bucket.overtime_hours), "0h 30m");
        assert_eq!(snapshot.status().status, ClockStatus::Off);
    }

    #[test]
    fn full_workflow_night_shift_in_progress() {
        let events = vec![
            PunchEvent::new("a", PunchKind::ClockIn, tokyo_ms(8, 22, 0)),
            PunchEvent::new("b", PunchKind::ClockOut, tokyo_ms(9, 6, 0)),
            PunchEvent::new("c", PunchKind::ClockIn, tokyo_ms(9, 22, 0)),
        ];
        let snapshot = Snapshot::take(&events, &FixedClock(tokyo_ms(9, 23, 0)));
        let aggregation = snapshot.aggregate(&AggregateOptions::default());

        // Only the closed shift counts; the one running since 22:00 does not.
        assert_eq!(aggregation.summary.today.night, 5.0);
        assert_eq!(aggregation.summary.today.morning, 1.0);
        assert_eq!(aggregation.summary.weekly_hours, 6.0);

        let status = snapshot.status();
        assert_eq!(status.status, ClockStatus::Working);
        assert_eq!(status.worked_hours_so_far, 1.0);
    }

    #[test]
    fn prelude_exports() {
        use crate::prelude::*;

        let _tz = parse_tz("Asia/Tokyo").unwrap();
        let _month = parse_month("2026-03").unwrap();
        let _order = SortOrder::default();
    }
}
