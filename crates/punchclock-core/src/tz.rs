//! Timezone handling utilities.
//!
//! Calendar dates and hour-of-day windows are evaluated in a fixed
//! reference zone, never the zone of the machine running the code.
//! Local wall-clock instants are resolved to UTC independently so that
//! DST days of 23 or 25 hours come out right.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{PunchclockError, Result};

/// Parse an IANA timezone name into a [`chrono_tz::Tz`].
///
/// # Examples
///
/// ```
/// use punchclock_core::tz::parse_tz;
///
/// let tz = parse_tz("Asia/Tokyo").unwrap();
/// assert_eq!(tz.to_string(), "Asia/Tokyo");
/// ```
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| PunchclockError::InvalidTimezone(name.to_string()))
}

/// Convert epoch milliseconds to a UTC datetime.
///
/// Values are clamped to a day inside chrono's range, so the result can be
/// shifted into any zone's local time without leaving that range.
pub fn ms_to_utc(ms: i64) -> DateTime<Utc> {
    let lowest = DateTime::<Utc>::MIN_UTC + TimeDelta::days(1);
    let highest = DateTime::<Utc>::MAX_UTC - TimeDelta::days(1);
    match Utc.timestamp_millis_opt(ms) {
        LocalResult::Single(dt) => dt.clamp(lowest, highest),
        _ if ms < 0 => lowest,
        _ => highest,
    }
}

/// Calendar date of an instant in the given zone.
pub fn local_date(ms: i64, tz: Tz) -> NaiveDate {
    ms_to_utc(ms).with_timezone(&tz).date_naive()
}

/// Convert a local wall-clock time to epoch milliseconds.
///
/// Ambiguous times (fall back) resolve to the earlier occurrence.
/// Nonexistent times (spring forward) shift forward to the first valid
/// local time after the gap.
pub fn local_to_ms(local: NaiveDateTime, tz: Tz) -> i64 {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        LocalResult::None => {
            // Gaps are at most a few hours; probe forward in 15 minute steps.
            let step = chrono::Duration::minutes(15);
            let mut probe = local;
            for _ in 0..(4 * 24) {
                probe = match probe.checked_add_signed(step) {
                    Some(next) => next,
                    None => break,
                };
                if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
                    return dt.timestamp_millis();
                }
            }
            local.and_utc().timestamp_millis()
        }
    }
}

/// Epoch milliseconds of `date` at `hour`:00 local time.
pub fn local_hour_to_ms(date: NaiveDate, hour: u32, tz: Tz) -> i64 {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    local_to_ms(date.and_time(time), tz)
}

/// Epoch milliseconds of local midnight starting `date`.
pub fn local_midnight_to_ms(date: NaiveDate, tz: Tz) -> i64 {
    local_hour_to_ms(date, 0, tz)
}

/// Format epoch milliseconds as RFC3339 with the zone's offset.
pub fn format_local(ms: i64, tz: Tz) -> String {
    ms_to_utc(ms)
        .with_timezone(&tz)
        .format("%Y-%m-%dT%H:%M:%S%:z")
        .to_string()
}
