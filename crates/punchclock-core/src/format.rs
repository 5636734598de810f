//! Human-readable duration formatting.

/// Render fractional hours as `"{h}h {m}m"`.
///
/// Minutes are rounded to the nearest whole minute before splitting, so a
/// value just under an hour boundary carries into the hour instead of
/// printing `60m`. Negative and non-finite input renders as `0h 0m`.
///
/// # Examples
///
/// ```
/// use punchclock_core::format::format_duration;
///
/// assert_eq!(format_duration(1.5), "1h 30m");
/// assert_eq!(format_duration(1.999), "2h 0m");
/// ```
pub fn format_duration(hours: f64) -> String {
    let total_minutes = if hours.is_finite() && hours > 0.0 {
        (hours * 60.0).round() as i64
    } else {
        0
    };
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}
