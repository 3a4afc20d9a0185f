//! Dashboard composition
//!
//! A [`Dashboard`] owns the dataset for one page lifetime and hands the same
//! read-only records to every chart and to the status counter.

use crate::{
    api_client::BookingSource,
    charts::{self, BarChart, Heatmap, KpiBox, LineChart, PieChart},
};
use hallstats_core::{
    Dataset, DatasetReport, Result, StatusCounts, aggregate, config::AggregationConfig,
};
use serde::Serialize;
use tracing::{error, info};

/// Every derived view of one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Total, approved, rejected and pending boxes
    pub kpis: Vec<KpiBox>,
    /// Raw status counts, including unrecognised statuses
    pub status_counts: StatusCounts,
    /// Ingestion problems found in the dataset
    pub report: DatasetReport,
    /// Bookings per hall
    pub hall_usage: BarChart,
    /// Bookings per month
    pub monthly_trend: LineChart,
    /// Bookings per event type
    pub event_types: PieChart,
    /// Bookings per requester type
    pub requester_types: PieChart,
    /// Bookings per weekday and start hour
    pub heatmap: Heatmap,
}

/// The dataset of one page lifetime together with how to aggregate it
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    dataset: Dataset,
    aggregation: AggregationConfig,
}

impl Dashboard {
    /// Fetch the dataset once from `source`
    ///
    /// A failed fetch is logged and leaves the dashboard empty.
    pub async fn load(source: &dyn BookingSource, aggregation: AggregationConfig) -> Self {
        let mut dashboard = Self::from_dataset(Dataset::empty(), aggregation);
        dashboard.refresh(source).await;
        dashboard
    }

    /// Wrap an already fetched dataset
    #[must_use]
    pub const fn from_dataset(dataset: Dataset, aggregation: AggregationConfig) -> Self {
        Self {
            dataset,
            aggregation,
        }
    }

    /// Fetch again, replacing the held dataset wholesale on success
    ///
    /// On failure the error is logged and the previous dataset is kept.
    pub async fn refresh(&mut self, source: &dyn BookingSource) {
        match source.fetch_bookings().await {
            Ok(records) => {
                info!(records = records.len(), "booking dataset loaded");
                self.dataset = Dataset::new(records);
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch bookings");
            }
        }
    }

    /// The held dataset
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Derive every view from the held dataset
    ///
    /// A view whose aggregation fails is logged and rendered empty; the
    /// others are unaffected.
    #[must_use]
    pub fn view(&self) -> DashboardView {
        let records = self.dataset.records();
        let policy = self.aggregation.malformed_policy;
        let status_counts = aggregate::count_statuses(records);

        DashboardView {
            kpis: charts::kpi_boxes(&status_counts),
            status_counts,
            report: *self.dataset.report(),
            hall_usage: or_empty("hall_usage", charts::hall_usage(records, policy)),
            monthly_trend: or_empty(
                "monthly_trend",
                charts::monthly_trend(records, policy, self.aggregation.month_order),
            ),
            event_types: or_empty("event_types", charts::event_types(records, policy)),
            requester_types: or_empty("requester_types", charts::requester_types(records, policy)),
            heatmap: or_empty("heatmap", charts::day_hour_heatmap(records, policy)),
        }
    }
}

fn or_empty<T: Default>(view: &'static str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        error!(view, error = %e, "Aggregation failed, rendering empty view");
        T::default()
    })
}
