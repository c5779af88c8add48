//! Calendar predicates and display formatting.
//!
//! "Today" compares year, month and day-of-month in the viewer's offset; it
//! is not a rolling 24-hour window.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Returns whether `at` falls on the same local calendar date as `now`.
pub fn is_same_calendar_day(at: &DateTime<Utc>, now: &DateTime<FixedOffset>) -> bool {
    at.with_timezone(now.offset()).date_naive() == now.date_naive()
}

/// Full local date and time, e.g. `2026-10-15 09:30`.
pub fn format_local_datetime(at: &DateTime<Utc>, now: &DateTime<FixedOffset>) -> String {
    at.with_timezone(now.offset())
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Local time of day, e.g. `09:30:05`.
pub fn format_local_time(at: &DateTime<Utc>, now: &DateTime<FixedOffset>) -> String {
    at.with_timezone(now.offset()).format("%H:%M:%S").to_string()
}

/// Short weekday and day-of-month for date badges, e.g. `("Sun", "11")`.
pub fn weekday_badge(at: &DateTime<Utc>, now: &DateTime<FixedOffset>) -> (String, String) {
    let local = at.with_timezone(now.offset());
    (local.format("%a").to_string(), local.format("%-d").to_string())
}

/// Parses a form date in the viewer's offset.
///
/// Accepts `datetime-local` input (`YYYY-MM-DDTHH:MM[:SS]`) or a full
/// RFC 3339 timestamp. Returns `None` for blank or unparsable input.
pub fn parse_local_datetime(input: &str, now: &DateTime<FixedOffset>) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    now.offset()
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}
