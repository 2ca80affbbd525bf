// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Inclusive UTC bounds of a calendar year, as GraphQL `DateTime` strings.
pub fn year_range(year: i32) -> (String, String) {
    (
        format!("{year:04}-01-01T00:00:00Z"),
        format!("{year:04}-12-31T23:59:59Z"),
    )
}

/// The current calendar year in UTC.
pub fn current_year() -> i32 {
    Utc::now().year()
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English month name for a calendar day given as `YYYY-MM-DD`.
///
/// Also accepts a full RFC 3339 timestamp, using its UTC date.
pub fn month_name(date: &str) -> Option<&'static str> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(date)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })?;
    MONTH_NAMES.get(day.month0() as usize).copied()
}

/// Weekday index (0 = Sunday .. 6 = Saturday) of a `YYYY-MM-DD` date.
pub fn weekday_index(date: &str) -> Option<u8> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|day| day.weekday().num_days_from_sunday() as u8)
}
