//! Parsing of outside text input: instants, dates and months.
//!
//! Instants may be given as:
//! - Unix epoch milliseconds (the punch log's native unit)
//! - Unix epoch seconds
//! - RFC3339 strings (e.g., `2026-03-09T18:00:00+09:00`)

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::error::{PunchclockError, Result};

fn parse_epoch_ms(input: &str) -> Result<DateTime<Utc>> {
    let ms: i64 = input.parse().map_err(|_| {
        PunchclockError::ParseError(format!(
            "Invalid epoch milliseconds: '{}'. Expected integer value.",
            input
        ))
    })?;

    Utc.timestamp_millis_opt(ms).single().ok_or_else(|| {
        PunchclockError::ParseError(format!("Epoch milliseconds out of range: {}", ms))
    })
}

fn parse_epoch_s(input: &str) -> Result<DateTime<Utc>> {
    let s: i64 = input.parse().map_err(|_| {
        PunchclockError::ParseError(format!(
            "Invalid epoch seconds: '{}'. Expected integer value.",
            input
        ))
    })?;

    Utc.timestamp_opt(s, 0)
        .single()
        .ok_or_else(|| PunchclockError::ParseError(format!("Epoch seconds out of range: {}", s)))
}

fn parse_rfc3339(input: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            PunchclockError::ParseError(format!(
                "Invalid RFC3339 timestamp: '{}'. Error: {}",
                input, e
            ))
        })
}

/// Parse a timestamp string, guessing the format.
///
/// Anything that looks like a date-time is read as RFC3339. Integers above
/// 10^10 are epoch milliseconds, smaller ones epoch seconds.
///
/// # Examples
///
/// ```
/// use punchclock_core::parse::parse_timestamp_auto;
///
/// let dt = parse_timestamp_auto("2026-03-09T18:00:00+09:00").unwrap();
/// assert_eq!(dt.timestamp_millis(), 1_773_046_800_000);
/// ```
pub fn parse_timestamp_auto(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();

    if trimmed.contains('T') || trimmed.contains(':') {
        return parse_rfc3339(trimmed);
    }

    match trimmed.parse::<i64>() {
        Ok(num) if num.abs() > 10_000_000_000 => parse_epoch_ms(trimmed),
        Ok(_) => parse_epoch_s(trimmed),
        Err(_) => Err(PunchclockError::ParseError(format!(
            "Could not auto-detect format for: '{}'",
            input
        ))),
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| {
        PunchclockError::ParseError(format!(
            "Invalid date: '{}'. Expected YYYY-MM-DD. Error: {}",
            input, e
        ))
    })
}

/// Parse a month in `YYYY-MM` form, returning its first day.
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    parse_date(&format!("{}-01", input.trim())).map_err(|_| {
        PunchclockError::ParseError(format!("Invalid month: '{}'. Expected YYYY-MM.", input))
    })
}
