//! Half-open millisecond spans and the overlap arithmetic built on them.
//!
//! Every duration in the crate is computed by clipping spans against
//! boundaries resolved in the reference zone: a shift minus its breaks,
//! split at local midnights, intersected with hour-of-day windows.
//! Nothing is sampled, so results are exact to the millisecond.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use crate::models::Shift;
use crate::tz::{local_date, local_hour_to_ms, local_midnight_to_ms};

/// A half-open interval `[start_ms, end_ms)` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl Span {
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    pub fn is_empty(&self) -> bool {
        self.end_ms <= self.start_ms
    }

    /// Length in milliseconds, saturating at `i64::MAX`.
    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms).max(0)
    }

    /// The common part of two spans, if any.
    pub fn intersect(&self, other: &Span) -> Option<Span> {
        let clipped = Span::new(
            self.start_ms.max(other.start_ms),
            self.end_ms.min(other.end_ms),
        );
        (!clipped.is_empty()).then_some(clipped)
    }

    pub fn overlap_ms(&self, other: &Span) -> i64 {
        self.intersect(other).map_or(0, |s| s.duration_ms())
    }
}

/// Time-of-day classification windows. Together they cover all 24 hours
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HourWindow {
    /// 22:00-24:00 and 00:00-05:00
    Night,
    /// 05:00-09:00
    Morning,
    /// 09:00-22:00
    Day,
}

impl HourWindow {
    pub const ALL: [HourWindow; 3] = [HourWindow::Night, HourWindow::Morning, HourWindow::Day];

    /// Local hour ranges `[from, to)` making up the window within one date.
    pub fn hour_ranges(&self) -> &'static [(u32, u32)] {
        match self {
            HourWindow::Night => &[(0, 5), (22, 24)],
            HourWindow::Morning => &[(5, 9)],
            HourWindow::Day => &[(9, 22)],
        }
    }

    /// Absolute spans of this window on `date` in `tz`.
    pub fn spans_on(&self, date: NaiveDate, tz: Tz) -> Vec<Span> {
        self.hour_ranges()
            .iter()
            .map(|&(from, to)| Span::new(hour_boundary(date, from, tz), hour_boundary(date, to, tz)))
            .filter(|span| !span.is_empty())
            .collect()
    }

    /// Milliseconds of `span` falling inside this window on `date`.
    pub fn overlap_ms(&self, span: &Span, date: NaiveDate, tz: Tz) -> i64 {
        self.spans_on(date, tz)
            .iter()
            .map(|window| span.overlap_ms(window))
            .sum()
    }
}

fn hour_boundary(date: NaiveDate, hour: u32, tz: Tz) -> i64 {
    if hour >= 24 {
        match date.succ_opt() {
            Some(next) => local_midnight_to_ms(next, tz),
            None => i64::MAX,
        }
    } else {
        local_hour_to_ms(date, hour, tz)
    }
}

/// The local day `[midnight, next midnight)` containing `date`.
pub fn day_span(date: NaiveDate, tz: Tz) -> Span {
    Span::new(local_midnight_to_ms(date, tz), hour_boundary(date, 24, tz))
}

/// Split a span at local midnights so each piece lies in exactly one date.
pub fn split_by_day(span: Span, tz: Tz) -> Vec<(NaiveDate, Span)> {
    let mut pieces = Vec::new();
    if span.is_empty() {
        return pieces;
    }

    let mut date = local_date(span.start_ms, tz);
    loop {
        let day = day_span(date, tz);
        if let Some(piece) = span.intersect(&day) {
            pieces.push((date, piece));
        }
        if day.end_ms >= span.end_ms {
            break;
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    pieces
}

/// The shift's break periods clipped to the shift, with running breaks
/// and an open shift ending at `open_end_ms`.
pub fn break_spans(shift: &Shift, open_end_ms: i64) -> Vec<Span> {
    let bounds = Span::new(shift.start_ms, shift.end_ms.unwrap_or(open_end_ms));
    let mut spans: Vec<Span> = shift
        .breaks
        .iter()
        .filter_map(|b| Span::new(b.start_ms, b.end_ms.unwrap_or(open_end_ms)).intersect(&bounds))
        .collect();
    spans.sort_by_key(|s| s.start_ms);
    spans
}

/// The shift with all break periods removed.
pub fn worked_spans(shift: &Shift, open_end_ms: i64) -> Vec<Span> {
    let end_ms = shift.end_ms.unwrap_or(open_end_ms);
    let mut worked = Vec::new();
    let mut cursor = shift.start_ms;

    for brk in break_spans(shift, open_end_ms) {
        if brk.start_ms > cursor {
            worked.push(Span::new(cursor, brk.start_ms));
        }
        cursor = cursor.max(brk.end_ms);
    }
    if end_ms > cursor {
        worked.push(Span::new(cursor, end_ms));
    }
    worked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BreakInterval;
    use chrono::TimeZone;

    const H: i64 = 3_600_000;

    fn tokyo() -> Tz {
        chrono_tz::Asia::Tokyo
    }

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> i64 {
        tokyo()
            .with_ymd_and_hms(y, m, d, hh, mm, 0)
            .single()
            .unwrap()
            .timestamp_millis()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn intersect_and_overlap() {
        let a = Span::new(0, 10);
        let b = Span::new(5, 20);
        assert_eq!(a.intersect(&b), Some(Span::new(5, 10)));
        assert_eq!(a.overlap_ms(&b), 5);
        assert_eq!(a.intersect(&Span::new(10, 20)), None);
    }

    #[test]
    fn duration_saturates_instead_of_overflowing() {
        assert_eq!(Span::new(i64::MIN, 0).duration_ms(), i64::MAX);
        assert_eq!(Span::new(i64::MIN, i64::MAX).duration_ms(), i64::MAX);
        assert_eq!(Span::new(i64::MAX, i64::MIN).duration_ms(), 0);
        assert_eq!(Span::new(-5, 5).duration_ms(), 10);
    }

    #[test]
    fn windows_partition_the_day() {
        let d = date(2026, 3, 9);
        let day = day_span(d, tokyo());
        let covered: i64 = HourWindow::ALL
            .iter()
            .map(|w| w.overlap_ms(&day, d, tokyo()))
            .sum();
        assert_eq!(covered, 24 * H);
    }

    #[test]
    fn night_window_has_two_parts() {
        let spans = HourWindow::Night.spans_on(date(2026, 3, 9), tokyo());
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0], Span::new(at(2026, 3, 9, 0, 0), at(2026, 3, 9, 5, 0)));
        assert_eq!(spans[1], Span::new(at(2026, 3, 9, 22, 0), at(2026, 3, 10, 0, 0)));
    }

    #[test]
    fn night_overlap_clips_partial_hours() {
        let d = date(2026, 3, 9);
        let span = Span::new(at(2026, 3, 9, 20, 15), at(2026, 3, 9, 23, 45));
        assert_eq!(HourWindow::Night.overlap_ms(&span, d, tokyo()), H + 45 * 60_000);
        assert_eq!(HourWindow::Day.overlap_ms(&span, d, tokyo()), H + 45 * 60_000);
        assert_eq!(HourWindow::Morning.overlap_ms(&span, d, tokyo()), 0);
    }

    #[test]
    fn split_at_midnight() {
        let span = Span::new(at(2026, 3, 9, 23, 0), at(2026, 3, 10, 2, 0));
        let pieces = split_by_day(span, tokyo());
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].0, date(2026, 3, 9));
        assert_eq!(pieces[0].1.duration_ms(), H);
        assert_eq!(pieces[1].0, date(2026, 3, 10));
        assert_eq!(pieces[1].1.duration_ms(), 2 * H);
    }

    #[test]
    fn split_ending_exactly_at_midnight_stays_on_one_day() {
        let span = Span::new(at(2026, 3, 9, 20, 0), at(2026, 3, 10, 0, 0));
        let pieces = split_by_day(span, tokyo());
        assert_eq!(pieces, vec![(date(2026, 3, 9), span)]);
    }

    #[test]
    fn split_spanning_several_days() {
        let span = Span::new(at(2026, 3, 9, 12, 0), at(2026, 3, 12, 12, 0));
        let pieces = split_by_day(span, tokyo());
        let dates: Vec<NaiveDate> = pieces.iter().map(|(d, _)| *d).collect();
        assert_eq!(
            dates,
            vec![date(2026, 3, 9), date(2026, 3, 10), date(2026, 3, 11), date(2026, 3, 12)]
        );
        let total: i64 = pieces.iter().map(|(_, s)| s.duration_ms()).sum();
        assert_eq!(total, 72 * H);
    }

    #[test]
    fn berlin_spring_forward_day_is_23_hours() {
        let tz: Tz = "Europe/Berlin".parse().unwrap();
        let d = date(2026, 3, 29);
        let day = day_span(d, tz);
        assert_eq!(day.duration_ms(), 23 * H);
        let covered: i64 = HourWindow::ALL.iter().map(|w| w.overlap_ms(&day, d, tz)).sum();
        assert_eq!(covered, 23 * H);
        assert_eq!(HourWindow::Night.overlap_ms(&day, d, tz), 6 * H);
    }

    #[test]
    fn worked_spans_remove_breaks() {
        let shift = Shift {
            start_ms: 0,
            end_ms: Some(10 * H),
            breaks: vec![
                BreakInterval { start_ms: 6 * H, end_ms: Some(7 * H) },
                BreakInterval { start_ms: 2 * H, end_ms: Some(3 * H) },
            ],
        };
        assert_eq!(
            worked_spans(&shift, 0),
            vec![Span::new(0, 2 * H), Span::new(3 * H, 6 * H), Span::new(7 * H, 10 * H)]
        );
        assert_eq!(break_spans(&shift, 0), vec![Span::new(2 * H, 3 * H), Span::new(6 * H, 7 * H)]);
    }

    #[test]
    fn running_break_ends_at_open_end() {
        let shift = Shift {
            start_ms: 0,
            end_ms: None,
            breaks: vec![BreakInterval { start_ms: 4 * H, end_ms: None }],
        };
        assert_eq!(worked_spans(&shift, 5 * H), vec![Span::new(0, 4 * H)]);
        assert_eq!(break_spans(&shift, 5 * H), vec![Span::new(4 * H, 5 * H)]);
    }

    #[test]
    fn break_at_shift_edges() {
        let shift = Shift {
            start_ms: 0,
            end_ms: Some(4 * H),
            breaks: vec![
                BreakInterval { start_ms: 0, end_ms: Some(H) },
                BreakInterval { start_ms: 3 * H, end_ms: Some(4 * H) },
            ],
        };
        assert_eq!(worked_spans(&shift, 0), vec![Span::new(H, 3 * H)]);
    }
}
