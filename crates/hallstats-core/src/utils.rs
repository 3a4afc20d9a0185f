//! Parsing and labelling helpers for booking fields

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Naive timestamp layouts accepted in addition to plain dates and RFC 3339/2822
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a booking date
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, naive `YYYY-MM-DD HH:MM:SS`
/// timestamps and the RFC 1123 form (`Fri, 05 Jan 2024 00:00:00 GMT`) that
/// Flask emits for date columns. Timestamps keep the calendar date of their
/// own offset.
///
/// # Errors
///
/// Returns [`Error::Validation`] if none of the encodings match.
pub fn parse_booking_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Ok(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(dt.date_naive());
    }

    Err(Error::Validation {
        field: "booking_date".to_string(),
        message: format!("unrecognised date {raw:?}"),
    })
}

/// Parse the hour of day from a start time such as `09:15` or `9:00:00`
///
/// Only the leading integer before the first `:` is read.
///
/// # Errors
///
/// Returns [`Error::Validation`] if there is no leading integer or it is not a
/// valid hour (0-23).
pub fn parse_start_hour(raw: &str) -> Result<u32> {
    let head = raw.split(':').next().unwrap_or_default().trim_start();
    let digits_end = head
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(head.len());
    let digits = &head[..digits_end];

    let invalid = |message: String| Error::Validation {
        field: "booking_start_time".to_string(),
        message,
    };

    if digits.is_empty() {
        return Err(invalid(format!("no leading hour in {raw:?}")));
    }

    let hour: u32 = digits
        .parse()
        .map_err(|_| invalid(format!("hour out of range in {raw:?}")))?;
    if hour > 23 {
        return Err(invalid(format!("hour {hour} out of range in {raw:?}")));
    }

    Ok(hour)
}

/// `YYYY-MM` label of a date; the day of month is discarded
#[must_use]
pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// English weekday name of a date, e.g. `Monday`
#[must_use]
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}
