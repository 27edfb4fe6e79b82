//! Time helpers: opening-hours checks and calendar dates
//!
//! Opening hours are "HH:MM" strings and are compared lexically; with a
//! zero-padded 24h clock that ordering matches chronological ordering.

use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike, Utc};

use shared::models::DayHours;
use shared::{AppError, AppResult};

/// Format an instant as "HH:MM" on the local 24h clock
pub fn hhmm(now: DateTime<Local>) -> String {
    format!("{:02}:{:02}", now.hour(), now.minute())
}

/// Calendar date of an instant, "YYYY-MM-DD"
pub fn calendar_date(now: DateTime<Local>) -> String {
    now.date_naive().format("%Y-%m-%d").to_string()
}

/// Current instant as an ISO-8601 / RFC 3339 string (UTC)
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Whether a restaurant is open at `now`, given its weekly opening hours
///
/// `opening_hours` has one entry per weekday, Monday first. A day with a
/// missing `open` or `close` is closed. The open bound is inclusive, the
/// close bound exclusive.
pub fn is_open_at(opening_hours: &[DayHours], now: DateTime<Local>) -> bool {
    let weekday = now.weekday().num_days_from_monday() as usize;
    let Some(today) = opening_hours.get(weekday) else {
        return false;
    };
    let (Some(open), Some(close)) = (&today.open, &today.close) else {
        return false;
    };

    let current = hhmm(now);
    open.as_str() <= current.as_str() && current.as_str() < close.as_str()
}
