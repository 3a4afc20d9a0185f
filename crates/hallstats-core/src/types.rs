//! Core data types for booking analytics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::{parse_booking_date, parse_start_hour};

/// Booking status as reported by the booking backend
///
/// Only `approved`, `rejected` and `pending` are recognised; they are matched
/// case-insensitively because the backend stores `Approved`/`Rejected` but
/// `pending`. Anything else is kept verbatim in [`BookingStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum BookingStatus {
    /// Approved by an administrator
    Approved,
    /// Rejected by an administrator or by a higher-priority approval
    Rejected,
    /// Awaiting approval
    Pending,
    /// Any other value (`at_risk`, `locked`, an empty string for a missing status, ...)
    Other(String),
}

impl BookingStatus {
    /// Parse a raw status string
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("approved") {
            Self::Approved
        } else if trimmed.eq_ignore_ascii_case("rejected") {
            Self::Rejected
        } else if trimmed.eq_ignore_ascii_case("pending") {
            Self::Pending
        } else {
            Self::Other(raw.to_string())
        }
    }

    /// Whether this is one of the three statuses the dashboard counts
    #[must_use]
    pub const fn is_recognised(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<Option<String>> for BookingStatus {
    fn from(raw: Option<String>) -> Self {
        raw.map_or_else(Self::default, |raw| Self::parse(&raw))
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Other(raw) => raw,
            recognised => recognised.to_string(),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::Pending => write!(f, "pending"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// One seminar-hall booking as returned by the booking backend
///
/// Deserializes from the backend's display-style keys (`"Hall name"`,
/// `"event Type"`, ...) as well as camelCase and snake_case spellings.
/// Serializes with camelCase keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Hall the booking is for
    #[serde(
        default,
        rename(deserialize = "Hall name", serialize = "hallName"),
        alias = "hallName",
        alias = "hall_name"
    )]
    pub hall_name: Option<String>,

    /// Event category, e.g. `Academic/placement events`
    #[serde(
        default,
        rename(deserialize = "event Type", serialize = "eventType"),
        alias = "eventType",
        alias = "event_type"
    )]
    pub event_type: Option<String>,

    /// Who requested the booking, e.g. `Faculty` or `Student club`
    #[serde(
        default,
        rename(deserialize = "Requester type", serialize = "requesterType"),
        alias = "requesterType",
        alias = "requester_type"
    )]
    pub requester_type: Option<String>,

    /// Approval status
    #[serde(
        default,
        rename(deserialize = "Booking status", serialize = "bookingStatus"),
        alias = "bookingStatus",
        alias = "booking_status"
    )]
    pub booking_status: BookingStatus,

    /// Calendar date, string-encoded
    #[serde(
        default,
        rename(deserialize = "Booking date", serialize = "bookingDate"),
        alias = "bookingDate",
        alias = "booking_date"
    )]
    pub booking_date: Option<String>,

    /// Start time, `HH:MM[...]`
    #[serde(
        default,
        rename(deserialize = "Booking start time", serialize = "bookingStartTime"),
        alias = "bookingStartTime",
        alias = "booking_start_time"
    )]
    pub booking_start_time: Option<String>,
}

impl BookingRecord {
    /// Parsed booking date
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if the date is missing or not in a
    /// supported encoding.
    pub fn date(&self) -> crate::Result<NaiveDate> {
        match self.booking_date.as_deref() {
            Some(raw) => parse_booking_date(raw),
            None => Err(crate::Error::Validation {
                field: "booking_date".to_string(),
                message: "missing".to_string(),
            }),
        }
    }

    /// Hour of day (0-23) the booking starts at
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if the start time is missing or has
    /// no leading hour.
    pub fn start_hour(&self) -> crate::Result<u32> {
        match self.booking_start_time.as_deref() {
            Some(raw) => parse_start_hour(raw),
            None => Err(crate::Error::Validation {
                field: "booking_start_time".to_string(),
                message: "missing".to_string(),
            }),
        }
    }
}

/// A (day-of-week, hour) bucket of the booking heatmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHourBucket {
    /// English weekday name, e.g. `Monday`
    pub day_of_week: String,
    /// Hour of day, 0-23
    pub hour: u32,
    /// Bookings starting in this slot
    pub count: u64,
}

impl DayHourBucket {
    /// Composite key, `Monday-9`
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}-{}", self.day_of_week, self.hour)
    }
}

/// Counts of bookings by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Number of records in the dataset
    pub total: u64,
    /// Approved bookings
    pub approved: u64,
    /// Rejected bookings
    pub rejected: u64,
    /// Pending bookings
    pub pending: u64,
    /// Bookings with any other status
    pub other: u64,
}
