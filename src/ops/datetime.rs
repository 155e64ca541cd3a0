//! Date and time helpers built on chrono.
//!
//! Every function that depends on "now" is a thin wrapper over a core
//! function taking the reference instant explicitly, so tests (and callers
//! that care) can inject a fixed clock instead of reading the wall clock.
//! Format patterns are validated before use; a bad pattern is a reported
//! error, never a panic.

use crate::error::DateTimeError;
use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Reject strftime patterns with unknown specifiers up front; formatting
/// with one would otherwise panic inside `Display`.
fn validate_pattern(pattern: &str) -> Result<(), DateTimeError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(DateTimeError::InvalidFormat {
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}

/// Current local timestamp in ISO-8601 form, to second precision.
pub fn current_timestamp() -> String {
    Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Current local date rendered with the given pattern.
pub fn current_date(pattern: &str) -> Result<String, DateTimeError> {
    format_date(Local::now().date_naive(), pattern)
}

/// Current local time rendered with the given pattern.
pub fn current_time(pattern: &str) -> Result<String, DateTimeError> {
    validate_pattern(pattern)?;
    Ok(Local::now().naive_local().format(pattern).to_string())
}

/// Parse a date string with the given pattern.
pub fn parse_date(value: &str, pattern: &str) -> Result<NaiveDate, DateTimeError> {
    NaiveDate::parse_from_str(value, pattern).map_err(|source| DateTimeError::Parse {
        value: value.to_string(),
        source,
    })
}

/// Render a date with the given pattern.
pub fn format_date(date: NaiveDate, pattern: &str) -> Result<String, DateTimeError> {
    validate_pattern(pattern)?;
    Ok(date.format(pattern).to_string())
}

/// Add (or subtract) whole days to a date.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, DateTimeError> {
    let delta = Duration::try_days(days).ok_or(DateTimeError::OutOfRange)?;
    date.checked_add_signed(delta).ok_or(DateTimeError::OutOfRange)
}

/// Add (or subtract) whole hours to a datetime.
pub fn add_hours(datetime: NaiveDateTime, hours: i64) -> Result<NaiveDateTime, DateTimeError> {
    let delta = Duration::try_hours(hours).ok_or(DateTimeError::OutOfRange)?;
    datetime.checked_add_signed(delta).ok_or(DateTimeError::OutOfRange)
}

/// Age in whole years at `today`, decremented when the anniversary has not
/// yet occurred this year.
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Age relative to the current local date.
pub fn calculate_age_now(birth: NaiveDate) -> i32 {
    calculate_age(birth, Local::now().date_naive())
}

/// Absolute difference between two dates in whole days.
pub fn days_between(first: NaiveDate, second: NaiveDate) -> i64 {
    (second - first).num_days().abs()
}

/// True for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    date.weekday().number_from_monday() >= 6
}

/// Name of the day of the week, e.g. "Monday".
pub fn day_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Name of the month, e.g. "January".
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// Humanize the distance between `past` and `now` into one of four buckets:
/// seconds (< 60s), minutes (< 1h), hours (< 1d), days. Timestamps that lie
/// in the future report "in the future" rather than a nonsense magnitude.
pub fn time_ago(past: NaiveDateTime, now: NaiveDateTime) -> String {
    let seconds = (now - past).num_seconds();
    if seconds < 0 {
        return "in the future".to_string();
    }
    if seconds < 60 {
        return plural(seconds, "second");
    }
    if seconds < 3600 {
        return plural(seconds / 60, "minute");
    }
    if seconds < 86400 {
        return plural(seconds / 3600, "hour");
    }
    plural(seconds / 86400, "day")
}

/// [`time_ago`] against the current local time.
pub fn time_ago_now(past: NaiveDateTime) -> String {
    time_ago(past, Local::now().naive_local())
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        parse_date(value, DEFAULT_DATE_FORMAT).unwrap()
    }

    fn datetime(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_parse_and_format_round_trip() {
        let d = date("2025-10-27");
        assert_eq!(format_date(d, "%Y-%m-%d").unwrap(), "2025-10-27");
        assert_eq!(format_date(d, "%B %d, %Y").unwrap(), "October 27, 2025");
    }

    #[test]
    fn test_parse_date_invalid_value() {
        assert!(matches!(
            parse_date("not-a-date", DEFAULT_DATE_FORMAT),
            Err(DateTimeError::Parse { .. })
        ));
    }

    #[test]
    fn test_format_rejects_bad_pattern() {
        let d = date("2025-10-27");
        assert!(matches!(
            format_date(d, "%Q"),
            Err(DateTimeError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_add_days_and_hours() {
        assert_eq!(add_days(date("2025-10-27"), 7).unwrap(), date("2025-11-03"));
        assert_eq!(add_days(date("2025-01-01"), -1).unwrap(), date("2024-12-31"));

        let dt = datetime("2025-10-27 22:00:00");
        assert_eq!(add_hours(dt, 3).unwrap(), datetime("2025-10-28 01:00:00"));
    }

    #[test]
    fn test_calculate_age_anniversary_boundary() {
        let birth = date("1990-06-15");
        assert_eq!(calculate_age(birth, date("2025-06-14")), 34);
        assert_eq!(calculate_age(birth, date("2025-06-15")), 35);
        assert_eq!(calculate_age(birth, date("2025-06-16")), 35);
    }

    #[test]
    fn test_days_between_is_symmetric() {
        let d1 = date("2025-01-01");
        let d2 = date("2025-01-10");
        assert_eq!(days_between(d1, d2), 9);
        assert_eq!(days_between(d2, d1), 9);
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(date("2025-10-25"))); // Saturday
        assert!(is_weekend(date("2025-10-26"))); // Sunday
        assert!(!is_weekend(date("2025-10-28"))); // Tuesday
    }

    #[test]
    fn test_day_and_month_names() {
        assert_eq!(day_name(date("2025-10-27")), "Monday");
        assert_eq!(month_name(date("2025-10-27")), "October");
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = datetime("2025-10-27 12:00:00");
        assert_eq!(time_ago(datetime("2025-10-27 11:59:30"), now), "30 seconds ago");
        assert_eq!(time_ago(datetime("2025-10-27 11:59:00"), now), "1 minute ago");
        assert_eq!(time_ago(datetime("2025-10-27 11:45:00"), now), "15 minutes ago");
        assert_eq!(time_ago(datetime("2025-10-27 10:00:00"), now), "2 hours ago");
        assert_eq!(time_ago(datetime("2025-10-24 12:00:00"), now), "3 days ago");
    }

    #[test]
    fn test_time_ago_singular_units() {
        let now = datetime("2025-10-27 12:00:00");
        assert_eq!(time_ago(datetime("2025-10-27 11:00:00"), now), "1 hour ago");
        assert_eq!(time_ago(datetime("2025-10-26 12:00:00"), now), "1 day ago");
    }

    #[test]
    fn test_time_ago_future_timestamp() {
        let now = datetime("2025-10-27 12:00:00");
        assert_eq!(time_ago(datetime("2025-10-27 13:00:00"), now), "in the future");
    }

    #[test]
    fn test_current_functions_do_not_fail() {
        assert!(!current_timestamp().is_empty());
        assert!(current_date(DEFAULT_DATE_FORMAT).is_ok());
        assert!(current_time(DEFAULT_TIME_FORMAT).is_ok());
    }
}
