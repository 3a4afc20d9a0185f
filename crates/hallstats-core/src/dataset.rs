//! The booking dataset held for one page lifetime

use crate::types::BookingRecord;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Field-level problems found when a dataset is ingested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetReport {
    /// Records ingested
    pub records: usize,
    /// Records whose booking date is missing or unparseable
    pub invalid_dates: usize,
    /// Records whose start time is missing or has no valid hour
    pub invalid_start_times: usize,
    /// Records with a status other than approved, rejected or pending
    pub unrecognised_statuses: usize,
}

impl DatasetReport {
    /// Whether every record parsed cleanly
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.invalid_dates == 0 && self.invalid_start_times == 0
    }
}

/// Immutable, shareable sequence of booking records
///
/// Cloning shares the underlying records.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[BookingRecord]>,
    report: DatasetReport,
}

impl Dataset {
    /// Ingest fetched records, validating their date and time fields once
    ///
    /// Records with bad fields are kept; each problem is logged and counted in
    /// the [`DatasetReport`].
    #[must_use]
    pub fn new(records: Vec<BookingRecord>) -> Self {
        let mut report = DatasetReport {
            records: records.len(),
            ..DatasetReport::default()
        };

        for (index, record) in records.iter().enumerate() {
            if let Err(err) = record.date() {
                report.invalid_dates += 1;
                warn!(index, error = %err, "booking record has an unusable date");
            }
            if let Err(err) = record.start_hour() {
                report.invalid_start_times += 1;
                warn!(index, error = %err, "booking record has an unusable start time");
            }
            if !record.booking_status.is_recognised() {
                report.unrecognised_statuses += 1;
            }
        }

        debug!(
            records = report.records,
            invalid_dates = report.invalid_dates,
            invalid_start_times = report.invalid_start_times,
            unrecognised_statuses = report.unrecognised_statuses,
            "dataset ingested"
        );

        Self {
            records: records.into(),
            report,
        }
    }

    /// Dataset with no records
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            report: DatasetReport::default(),
        }
    }

    /// Records in fetch order
    #[must_use]
    pub fn records(&self) -> &[BookingRecord] {
        &self.records
    }

    /// Shared handle to the records
    #[must_use]
    pub fn shared(&self) -> Arc<[BookingRecord]> {
        Arc::clone(&self.records)
    }

    /// Ingestion report
    #[must_use]
    pub const fn report(&self) -> &DatasetReport {
        &self.report
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BookingStatus;
    use pretty_assertions::assert_eq;

    fn record(date: Option<&str>, time: Option<&str>, status: &str) -> BookingRecord {
        BookingRecord {
            hall_name: Some("Main".to_string()),
            booking_status: BookingStatus::parse(status),
            booking_date: date.map(str::to_string),
            booking_start_time: time.map(str::to_string),
            ..BookingRecord::default()
        }
    }

    #[test]
    fn test_report_counts_problems_but_keeps_records() {
        let dataset = Dataset::new(vec![
            record(Some("2024-01-05"), Some("09:00"), "approved"),
            record(Some("bad"), Some("09:00"), "pending"),
            record(Some("2024-01-06"), Some("noon"), "locked"),
            record(None, None, "rejected"),
        ]);

        assert_eq!(dataset.len(), 4);
        assert_eq!(
            *dataset.report(),
            DatasetReport {
                records: 4,
                invalid_dates: 2,
                invalid_start_times: 2,
                unrecognised_statuses: 1,
            }
        );
        assert!(!dataset.report().is_clean());
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::empty();
        assert!(dataset.is_empty());
        assert!(dataset.report().is_clean());
        assert_eq!(dataset.records().len(), 0);
    }

    #[test]
    fn test_clones_share_records() {
        let dataset = Dataset::new(vec![record(Some("2024-01-05"), Some("09:00"), "approved")]);
        let clone = dataset.clone();
        assert!(Arc::ptr_eq(&dataset.shared(), &clone.shared()));
    }
}
