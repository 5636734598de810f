//! Core data types for punchclock.
//!
//! This module defines the primary types used throughout the library:
//! - [`PunchKind`] / [`PunchEvent`] - Raw, externally supplied clock events
//! - [`Shift`] / [`BreakInterval`] - Work sessions rebuilt from the event log
//! - [`DayBucket`] - Aggregated statistics for one calendar date
//! - [`Summary`] / [`TodayBreakdown`] - Rolled-up weekly, monthly and today totals
//! - [`ClockStatus`] - What the most recent punch says the worker is doing
//! - [`AggregateOptions`] - Reference zone and overtime threshold
//! - [`Profile`] / [`VisaType`] / [`LimitStatus`] - Weekly limit reporting

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{PunchclockError, Result};

/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 3_600_000;

/// Default daily overtime threshold in hours.
pub const DEFAULT_OVERTIME_THRESHOLD_HOURS: f64 = 8.0;

/// Default reference zone for date bucketing.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;

/// Kind of punch recorded by the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PunchKind {
    ClockIn,
    BreakStart,
    BreakEnd,
    ClockOut,
}

impl PunchKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PunchKind::ClockIn => "CLOCK_IN",
            PunchKind::BreakStart => "BREAK_START",
            PunchKind::BreakEnd => "BREAK_END",
            PunchKind::ClockOut => "CLOCK_OUT",
        }
    }
}

impl std::fmt::Display for PunchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PunchKind {
    type Err = PunchclockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "CLOCK_IN" => Ok(PunchKind::ClockIn),
            "BREAK_START" => Ok(PunchKind::BreakStart),
            "BREAK_END" => Ok(PunchKind::BreakEnd),
            "CLOCK_OUT" => Ok(PunchKind::ClockOut),
            _ => Err(PunchclockError::ParseError(format!(
                "Unknown punch type: '{}'. Expected CLOCK_IN, BREAK_START, BREAK_END or CLOCK_OUT",
                s
            ))),
        }
    }
}

/// A single timestamped punch.
///
/// The JSON form matches the stored log record:
/// `{"id": "...", "type": "CLOCK_IN", "timestamp": 1767225600000}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// Opaque identifier assigned by the event store.
    pub id: String,
    /// What happened.
    #[serde(rename = "type")]
    pub kind: PunchKind,
    /// Epoch milliseconds (UTC).
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    /// Free-form note entered with the punch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PunchEvent {
    pub fn new(id: impl Into<String>, kind: PunchKind, timestamp_ms: i64) -> Self {
        Self {
            id: id.into(),
            kind,
            timestamp_ms,
            note: None,
        }
    }
}

/// A break taken inside a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakInterval {
    pub start_ms: i64,
    /// `None` while the break is still running.
    pub end_ms: Option<i64>,
}

/// A work session from clock-in to clock-out.
///
/// Breaks are non-overlapping, contained in the shift and ordered by start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shift {
    pub start_ms: i64,
    /// `None` while the shift is still open.
    pub end_ms: Option<i64>,
    pub breaks: Vec<BreakInterval>,
}

impl Shift {
    pub fn open(start_ms: i64) -> Self {
        Self {
            start_ms,
            end_ms: None,
            breaks: Vec::new(),
        }
    }
}

/// Aggregated statistics for one calendar date in the reference zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub worked_hours: f64,
    /// Worked hours inside 22:00-05:00 local time.
    pub night_hours: f64,
    pub break_hours: f64,
    /// `max(0, worked_hours - threshold)`, computed once per date.
    pub overtime_hours: f64,
}

impl DayBucket {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            worked_hours: 0.0,
            night_hours: 0.0,
            break_hours: 0.0,
            overtime_hours: 0.0,
        }
    }

    /// Bucket key in `YYYY-MM-DD` form.
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Worked hours on the reference date split by time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TodayBreakdown {
    /// 05:00-09:00
    pub morning: f64,
    /// 09:00-22:00
    pub day: f64,
    /// 22:00-05:00
    pub night: f64,
    pub total: f64,
}

/// Rolled-up totals relative to a reference time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Monday of the reference week through the reference date.
    pub weekly_hours: f64,
    /// First of the reference month through the reference date.
    pub monthly_hours: f64,
    pub today: TodayBreakdown,
}

/// What the most recent punch says the worker is doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockStatus {
    #[default]
    Off,
    Working,
    OnBreak,
}

impl ClockStatus {
    /// Status implied by the kind of the latest punch.
    pub fn after(kind: PunchKind) -> Self {
        match kind {
            PunchKind::ClockIn | PunchKind::BreakEnd => ClockStatus::Working,
            PunchKind::BreakStart => ClockStatus::OnBreak,
            PunchKind::ClockOut => ClockStatus::Off,
        }
    }

    /// Punches that make sense from this status.
    pub fn allowed_punches(&self) -> &'static [PunchKind] {
        match self {
            ClockStatus::Off => &[PunchKind::ClockIn],
            ClockStatus::Working => &[PunchKind::BreakStart, PunchKind::ClockOut],
            ClockStatus::OnBreak => &[PunchKind::BreakEnd],
        }
    }
}

impl std::fmt::Display for ClockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockStatus::Off => write!(f, "off"),
            ClockStatus::Working => write!(f, "working"),
            ClockStatus::OnBreak => write!(f, "on_break"),
        }
    }
}

/// Ordering of day buckets handed to a report renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl std::str::FromStr for SortOrder {
    type Err = PunchclockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(PunchclockError::ParseError(format!(
                "Unknown order: '{}'. Expected 'asc' or 'desc'",
                s
            ))),
        }
    }
}

/// Parameters of an aggregation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateOptions {
    /// Zone used for calendar dates and hour-of-day windows.
    pub tz: Tz,
    /// Daily hours beyond which time counts as overtime.
    pub overtime_threshold_hours: f64,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            tz: DEFAULT_TIMEZONE,
            overtime_threshold_hours: DEFAULT_OVERTIME_THRESHOLD_HOURS,
        }
    }
}

/// Residence category of the worker, which decides the weekly limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisaType {
    Regular,
    /// Capped at 28 hours per week.
    #[default]
    Student,
}

impl VisaType {
    /// Weekly hour limit, if the category has one.
    pub fn weekly_limit_hours(&self) -> Option<f64> {
        match self {
            VisaType::Regular => None,
            VisaType::Student => Some(28.0),
        }
    }

    /// Weekly total above which a warning is shown.
    pub fn weekly_warning_hours(&self) -> Option<f64> {
        match self {
            VisaType::Regular => None,
            VisaType::Student => Some(20.0),
        }
    }
}

impl std::fmt::Display for VisaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisaType::Regular => write!(f, "regular"),
            VisaType::Student => write!(f, "student"),
        }
    }
}

/// Worker profile supplied by the surrounding application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub visa_type: VisaType,
}

/// Comparison of a weekly total against the profile's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitStatus {
    /// No limit applies, or the total is below the warning threshold.
    Ok,
    /// Above the warning threshold but within the limit.
    Warning,
    Exceeded,
}

impl Profile {
    /// Classify a weekly total. Reports only; nothing is enforced.
    pub fn weekly_limit_status(&self, weekly_hours: f64) -> LimitStatus {
        let visa = self.visa_type;
        match (visa.weekly_limit_hours(), visa.weekly_warning_hours()) {
            (Some(limit), _) if weekly_hours > limit => LimitStatus::Exceeded,
            (_, Some(warn)) if weekly_hours > warn => LimitStatus::Warning,
            _ => LimitStatus::Ok,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn punch_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&PunchKind::ClockIn).unwrap(),
            "\"CLOCK_IN\""
        );
        assert_eq!(
            serde_json::to_string(&PunchKind::BreakStart).unwrap(),
            "\"BREAK_START\""
        );
    }

    #[test]
    fn punch_kind_from_str() {
        assert_eq!(PunchKind::from_str("clock_out").unwrap(), PunchKind::ClockOut);
        assert_eq!(PunchKind::from_str("break-end").unwrap(), PunchKind::BreakEnd);
        assert!(PunchKind::from_str("lunch").is_err());
    }

    #[test]
    fn punch_event_reads_stored_record() {
        let json = r#"{"id":"k3j9x","type":"BREAK_START","timestamp":1767236400000}"#;
        let event: PunchEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, "k3j9x");
        assert_eq!(event.kind, PunchKind::BreakStart);
        assert_eq!(event.timestamp_ms, 1_767_236_400_000);
        assert_eq!(event.note, None);
    }

    #[test]
    fn punch_event_keeps_note() {
        let json = r#"{"id":"a","type":"CLOCK_IN","timestamp":0,"note":"late bus"}"#;
        let event: PunchEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.note.as_deref(), Some("late bus"));
    }

    #[test]
    fn day_bucket_key_and_serialization() {
        let bucket = DayBucket::empty(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        assert_eq!(bucket.key(), "2026-03-09");

        let json = serde_json::to_value(&bucket).unwrap();
        assert_eq!(json["date"], "2026-03-09");
        assert_eq!(json["worked_hours"], 0.0);
    }

    #[test]
    fn clock_status_follows_last_punch() {
        assert_eq!(ClockStatus::after(PunchKind::ClockIn), ClockStatus::Working);
        assert_eq!(ClockStatus::after(PunchKind::BreakEnd), ClockStatus::Working);
        assert_eq!(ClockStatus::after(PunchKind::BreakStart), ClockStatus::OnBreak);
        assert_eq!(ClockStatus::after(PunchKind::ClockOut), ClockStatus::Off);
    }

    #[test]
    fn allowed_punches_per_status() {
        assert_eq!(ClockStatus::Off.allowed_punches(), &[PunchKind::ClockIn]);
        assert_eq!(
            ClockStatus::Working.allowed_punches(),
            &[PunchKind::BreakStart, PunchKind::ClockOut]
        );
        assert_eq!(ClockStatus::OnBreak.allowed_punches(), &[PunchKind::BreakEnd]);
    }

    #[test]
    fn aggregate_options_default_is_tokyo_eight_hours() {
        let options = AggregateOptions::default();
        assert_eq!(options.tz, chrono_tz::Asia::Tokyo);
        assert_eq!(options.overtime_threshold_hours, 8.0);
    }

    #[test]
    fn sort_order_from_str() {
        assert_eq!(SortOrder::from_str("asc").unwrap(), SortOrder::Ascending);
        assert_eq!(SortOrder::from_str("DESC").unwrap(), SortOrder::Descending);
        assert!(SortOrder::from_str("random").is_err());
    }

    #[test]
    fn student_weekly_limit_status() {
        let profile = Profile {
            name: "Aiko".to_string(),
            visa_type: VisaType::Student,
        };
        assert_eq!(profile.weekly_limit_status(12.0), LimitStatus::Ok);
        assert_eq!(profile.weekly_limit_status(20.0), LimitStatus::Ok);
        assert_eq!(profile.weekly_limit_status(24.5), LimitStatus::Warning);
        assert_eq!(profile.weekly_limit_status(28.0), LimitStatus::Warning);
        assert_eq!(profile.weekly_limit_status(28.5), LimitStatus::Exceeded);
    }

    #[test]
    fn regular_profile_has_no_limit() {
        let profile = Profile {
            name: String::new(),
            visa_type: VisaType::Regular,
        };
        assert_eq!(profile.weekly_limit_status(60.0), LimitStatus::Ok);
    }

    #[test]
    fn visa_type_deserializes_lowercase() {
        let visa: VisaType = serde_json::from_str("\"regular\"").unwrap();
        assert_eq!(visa, VisaType::Regular);
        assert_eq!(VisaType::default(), VisaType::Student);
    }
}
