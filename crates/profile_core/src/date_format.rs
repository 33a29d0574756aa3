//! Humanized message dates.

use chrono::{DateTime, TimeZone, Utc};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Formats `date_ms` relative to `now_ms` in the display zone `tz`.
///
/// Whole elapsed days (absolute difference, rounded down) select the form:
/// 0 → `今天 HH:MM`, 1 → `昨天 HH:MM`, 2..=6 → `N天前`, else `YYYY-MM-DD`.
///
/// Partial days round down, not up: a message 23 hours old is `今天`, and one
/// 25 hours old is `昨天`. Day boundaries are elapsed time, not calendar dates.
pub fn format_relative<Tz: TimeZone>(date_ms: i64, now_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(date) = DateTime::<Utc>::from_timestamp_millis(date_ms) else {
        return date_ms.to_string();
    };
    let local = date.with_timezone(tz);
    let elapsed_days = (now_ms - date_ms).abs() / DAY_MS;

    match elapsed_days {
        0 => format!("今天 {}", local.format("%H:%M")),
        1 => format!("昨天 {}", local.format("%H:%M")),
        2..=6 => format!("{elapsed_days}天前"),
        _ => local.format("%Y-%m-%d").to_string(),
    }
}

/// Formats a stored date string, rendering unparseable input verbatim.
pub fn format_stored_date<Tz: TimeZone>(raw: &str, now_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match crate::model::message::parse_timestamp_ms(raw) {
        Some(date_ms) => format_relative(date_ms, now_ms, tz),
        None => raw.to_string(),
    }
}
