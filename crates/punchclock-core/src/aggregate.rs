//! Duration aggregation over closed shifts.
//!
//! Worked time (shift minus breaks) and break time are split at local
//! midnights in the reference zone and tallied per calendar date in
//! milliseconds. Hours are derived only when the buckets are built, and
//! overtime is taken from the finished daily total, never per shift.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::interval::{HourWindow, break_spans, split_by_day, worked_spans};
use crate::models::{
    AggregateOptions, DayBucket, MS_PER_HOUR, PunchEvent, Shift, SortOrder, Summary,
    TodayBreakdown,
};
use crate::reconstruct::reconstruct;
use crate::tz::local_date;

/// Per-date running totals in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DayTally {
    worked_ms: i64,
    night_ms: i64,
    morning_ms: i64,
    day_ms: i64,
    break_ms: i64,
}

impl DayTally {
    fn add_window(&mut self, window: HourWindow, ms: i64) {
        match window {
            HourWindow::Night => self.night_ms = self.night_ms.saturating_add(ms),
            HourWindow::Morning => self.morning_ms = self.morning_ms.saturating_add(ms),
            HourWindow::Day => self.day_ms = self.day_ms.saturating_add(ms),
        }
    }
}

fn hours(ms: i64) -> f64 {
    ms as f64 / MS_PER_HOUR as f64
}

/// Output of one aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    /// Calendar date of the reference time in the reference zone.
    pub reference_date: NaiveDate,
    /// One bucket per date that saw worked or break time.
    pub days: BTreeMap<NaiveDate, DayBucket>,
    pub summary: Summary,
}

impl Aggregation {
    pub fn bucket(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.days.get(&date)
    }

    /// All buckets in the requested order.
    pub fn day_buckets(&self, order: SortOrder) -> Vec<DayBucket> {
        let mut buckets: Vec<DayBucket> = self.days.values().cloned().collect();
        if order == SortOrder::Descending {
            buckets.reverse();
        }
        buckets
    }

    /// Buckets with `from <= date <= to` in the requested order.
    ///
    /// Dates without activity are absent; callers that need a row per day
    /// synthesize zero rows.
    pub fn buckets_in_range(&self, from: NaiveDate, to: NaiveDate, order: SortOrder) -> Vec<DayBucket> {
        if from > to {
            return Vec::new();
        }
        let mut buckets: Vec<DayBucket> = self.days.range(from..=to).map(|(_, b)| b.clone()).collect();
        if order == SortOrder::Descending {
            buckets.reverse();
        }
        buckets
    }
}

/// Aggregate closed shifts relative to `reference_ms`.
///
/// Open shifts are skipped. With no shifts the summary is all zero and
/// the bucket map is empty.
pub fn aggregate(shifts: &[Shift], reference_ms: i64, options: &AggregateOptions) -> Aggregation {
    let tz = options.tz;
    let mut tallies: BTreeMap<NaiveDate, DayTally> = BTreeMap::new();

    for shift in shifts {
        let Some(end_ms) = shift.end_ms else {
            debug!(start_ms = shift.start_ms, "skipping open shift");
            continue;
        };

        for span in worked_spans(shift, end_ms) {
            for (date, piece) in split_by_day(span, tz) {
                let tally = tallies.entry(date).or_default();
                tally.worked_ms = tally.worked_ms.saturating_add(piece.duration_ms());
                for window in HourWindow::ALL {
                    tally.add_window(window, window.overlap_ms(&piece, date, tz));
                }
            }
        }

        for span in break_spans(shift, end_ms) {
            for (date, piece) in split_by_day(span, tz) {
                let tally = tallies.entry(date).or_default();
                tally.break_ms = tally.break_ms.saturating_add(piece.duration_ms());
            }
        }
    }

    let days: BTreeMap<NaiveDate, DayBucket> = tallies
        .iter()
        .map(|(&date, tally)| {
            let worked_hours = hours(tally.worked_ms);
            let bucket = DayBucket {
                date,
                worked_hours,
                night_hours: hours(tally.night_ms),
                break_hours: hours(tally.break_ms),
                overtime_hours: (worked_hours - options.overtime_threshold_hours).max(0.0),
            };
            (date, bucket)
        })
        .collect();

    let reference_date = local_date(reference_ms, tz);
    let summary = summarize(&tallies, reference_date);

    debug!(
        shifts = shifts.len(),
        days = days.len(),
        %reference_date,
        weekly_hours = summary.weekly_hours,
        monthly_hours = summary.monthly_hours,
        "aggregated shifts"
    );

    Aggregation {
        reference_date,
        days,
        summary,
    }
}

/// Reconstruct shifts from a punch log and aggregate them.
pub fn aggregate_events(
    events: &[PunchEvent],
    reference_ms: i64,
    options: &AggregateOptions,
) -> Aggregation {
    aggregate(&reconstruct(events), reference_ms, options)
}

/// Monday of the week containing `date`. Sunday belongs to the week that
/// started six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = Duration::days(date.weekday().num_days_from_monday() as i64);
    date.checked_sub_signed(offset).unwrap_or(NaiveDate::MIN)
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn summarize(tallies: &BTreeMap<NaiveDate, DayTally>, reference_date: NaiveDate) -> Summary {
    let worked_between = |from: NaiveDate| -> i64 {
        tallies
            .range(from..=reference_date)
            .fold(0i64, |total, (_, tally)| total.saturating_add(tally.worked_ms))
    };

    let today = tallies
        .get(&reference_date)
        .map(|tally| TodayBreakdown {
            morning: hours(tally.morning_ms),
            day: hours(tally.day_ms),
            night: hours(tally.night_ms),
            total: hours(tally.worked_ms),
        })
        .unwrap_or_default();

    Summary {
        weekly_hours: hours(worked_between(week_start(reference_date))),
        monthly_hours: hours(worked_between(month_start(reference_date))),
        today,
    }
}
