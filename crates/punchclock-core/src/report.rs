//! Monthly report data.
//!
//! Builds the table a report renderer prints: one row per date of a
//! month in ascending order and a totals row. Rendering itself happens
//! elsewhere.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::aggregate::Aggregation;
use crate::models::{DayBucket, SortOrder};

/// Column sums of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReportTotals {
    pub worked_hours: f64,
    pub night_hours: f64,
    pub break_hours: f64,
    pub overtime_hours: f64,
}

impl ReportTotals {
    fn add(&mut self, bucket: &DayBucket) {
        self.worked_hours += bucket.worked_hours;
        self.night_hours += bucket.night_hours;
        self.break_hours += bucket.break_hours;
        self.overtime_hours += bucket.overtime_hours;
    }
}

/// Report rows and totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    /// Month label, `YYYY-MM`.
    pub month: String,
    pub rows: Vec<DayBucket>,
    pub totals: ReportTotals,
}

/// First day of the month after the one containing `date`.
fn next_month_start(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

impl MonthlyReport {
    /// Build the report for the month containing `month`.
    ///
    /// With `fill_gaps`, dates without activity appear as zero rows so the
    /// table has one row per calendar day.
    pub fn build(aggregation: &Aggregation, month: NaiveDate, fill_gaps: bool) -> Self {
        let first = month.with_day(1).unwrap_or(month);
        let last = next_month_start(first)
            .and_then(|next| next.pred_opt())
            .unwrap_or(first);

        let rows = if fill_gaps {
            first
                .iter_days()
                .take_while(|date| *date <= last)
                .map(|date| {
                    aggregation
                        .bucket(date)
                        .cloned()
                        .unwrap_or_else(|| DayBucket::empty(date))
                })
                .collect()
        } else {
            aggregation.buckets_in_range(first, last, SortOrder::Ascending)
        };

        let mut totals = ReportTotals::default();
        for row in &rows {
            totals.add(row);
        }

        Self {
            month: first.format("%Y-%m").to_string(),
            rows,
            totals,
        }
    }
}
