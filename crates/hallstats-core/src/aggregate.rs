//! Aggregations over booking records
//!
//! Every function here is pure: it reads the record slice once and returns a
//! fresh summary. Keyed summaries keep first-seen key order.

use crate::types::{BookingRecord, BookingStatus, DayHourBucket, StatusCounts};
use crate::utils::{month_label, weekday_name};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What an aggregator does with a record whose grouping value is missing or unparseable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Leave the record out of this aggregate only
    #[default]
    Skip,
    /// Fail the aggregate with [`Error::MalformedRecord`]
    Strict,
}

/// Ordering of the monthly aggregate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthOrder {
    /// Order in which months first appear in the input
    #[default]
    FirstSeen,
    /// Calendar order
    Chronological,
}

/// Categorical field a single-key aggregate groups by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupField {
    /// `hall_name`
    HallName,
    /// `event_type`
    EventType,
    /// `requester_type`
    RequesterType,
}

impl GroupField {
    /// Field name used in errors and logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HallName => "hall_name",
            Self::EventType => "event_type",
            Self::RequesterType => "requester_type",
        }
    }

    /// Value of this field on a record
    #[must_use]
    pub fn select(self, record: &BookingRecord) -> Option<&str> {
        match self {
            Self::HallName => record.hall_name.as_deref(),
            Self::EventType => record.event_type.as_deref(),
            Self::RequesterType => record.requester_type.as_deref(),
        }
    }
}

/// Insertion-ordered key → count mapping
///
/// Equality ignores entry order; compare [`Tally::to_pairs`] when order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally(IndexMap<String, u64>);

impl Tally {
    /// Empty tally
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `key`
    pub fn increment(&mut self, key: &str) {
        if let Some(count) = self.0.get_mut(key) {
            *count += 1;
        } else {
            self.0.insert(key.to_string(), 1);
        }
    }

    /// Count for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.get(key).copied()
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no key has been counted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.0.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// Entries in order, owned
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, u64)> {
        self.0
            .iter()
            .map(|(key, count)| (key.clone(), *count))
            .collect()
    }

}

impl FromIterator<(String, u64)> for Tally {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut tally = Self::new();
        for (key, count) in iter {
            *tally.0.entry(key).or_insert(0) += count;
        }
        tally
    }
}

impl<'a> FromIterator<&'a str> for Tally {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tally = Self::new();
        for key in iter {
            tally.increment(key);
        }
        tally
    }
}

fn apply_policy(policy: MalformedPolicy, err: Error) -> Result<()> {
    match policy {
        MalformedPolicy::Skip => {
            debug!(error = %err, "skipping record in aggregate");
            Ok(())
        }
        MalformedPolicy::Strict => Err(err),
    }
}

fn reason(err: &Error) -> String {
    match err {
        Error::Validation { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Count records by status
///
/// Statuses other than approved, rejected and pending count only towards
/// `other` and `total`.
#[must_use]
pub fn count_statuses(records: &[BookingRecord]) -> StatusCounts {
    records
        .iter()
        .fold(StatusCounts::default(), |mut counts, record| {
            counts.total += 1;
            match record.booking_status {
                BookingStatus::Approved => counts.approved += 1,
                BookingStatus::Rejected => counts.rejected += 1,
                BookingStatus::Pending => counts.pending += 1,
                BookingStatus::Other(_) => counts.other += 1,
            }
            counts
        })
}

/// Count records per distinct value of `field`, in first-seen order
///
/// # Errors
///
/// With [`MalformedPolicy::Strict`], returns [`Error::MalformedRecord`] for
/// the first record missing the field.
pub fn group_by_field(
    records: &[BookingRecord],
    field: GroupField,
    policy: MalformedPolicy,
) -> Result<Tally> {
    let mut tally = Tally::new();

    for (index, record) in records.iter().enumerate() {
        match field.select(record) {
            Some(key) => tally.increment(key),
            None => apply_policy(
                policy,
                Error::malformed(index, field.name(), None, "grouping value missing"),
            )?,
        }
    }

    Ok(tally)
}

/// Count records per `YYYY-MM` of their booking date
///
/// With [`MonthOrder::FirstSeen`] months appear in the order the input first
/// mentions them; callers wanting calendar order either pre-sort the input or
/// ask for [`MonthOrder::Chronological`].
///
/// # Errors
///
/// With [`MalformedPolicy::Strict`], returns [`Error::MalformedRecord`] for
/// the first record whose date is missing or unparseable.
pub fn group_by_month(
    records: &[BookingRecord],
    policy: MalformedPolicy,
    order: MonthOrder,
) -> Result<Tally> {
    let mut dates = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        match record.date() {
            Ok(date) => dates.push(date),
            Err(err) => apply_policy(
                policy,
                Error::malformed(
                    index,
                    "booking_date",
                    record.booking_date.as_deref(),
                    reason(&err),
                ),
            )?,
        }
    }

    Ok(tally_months(dates, order))
}

/// Bucket dates by calendar month
///
/// Chronological order compares `(year, month)` numerically, so labels of
/// years outside `0..=9999` (`-0001`, `+10000`) still sort by date.
fn tally_months(dates: impl IntoIterator<Item = NaiveDate>, order: MonthOrder) -> Tally {
    let mut months: IndexMap<(i32, u32), (NaiveDate, u64)> = IndexMap::new();
    for date in dates {
        months
            .entry((date.year(), date.month()))
            .or_insert((date, 0))
            .1 += 1;
    }

    if order == MonthOrder::Chronological {
        months.sort_keys();
    }

    months
        .into_values()
        .map(|(date, count)| (month_label(date), count))
        .collect()
}

/// Count records per (weekday, start hour) pair, in first-seen order
///
/// # Errors
///
/// With [`MalformedPolicy::Strict`], returns [`Error::MalformedRecord`] for
/// the first record whose date or start time is missing or unparseable.
pub fn group_by_day_hour(
    records: &[BookingRecord],
    policy: MalformedPolicy,
) -> Result<Vec<DayHourBucket>> {
    let mut buckets: IndexMap<(String, u32), u64> = IndexMap::new();

    for (index, record) in records.iter().enumerate() {
        let date = match record.date() {
            Ok(date) => date,
            Err(err) => {
                apply_policy(
                    policy,
                    Error::malformed(
                        index,
                        "booking_date",
                        record.booking_date.as_deref(),
                        reason(&err),
                    ),
                )?;
                continue;
            }
        };
        let hour = match record.start_hour() {
            Ok(hour) => hour,
            Err(err) => {
                apply_policy(
                    policy,
                    Error::malformed(
                        index,
                        "booking_start_time",
                        record.booking_start_time.as_deref(),
                        reason(&err),
                    ),
                )?;
                continue;
            }
        };

        *buckets.entry((weekday_name(date), hour)).or_insert(0) += 1;
    }

    Ok(buckets
        .into_iter()
        .map(|((day_of_week, hour), count)| DayHourBucket {
            day_of_week,
            hour,
            count,
        })
        .collect())
}
