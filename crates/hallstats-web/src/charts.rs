//! Chart models built from the aggregators
//!
//! Each model is what one dashboard widget needs and nothing more. Series are
//! arrays of points so their order survives JSON encoding.

use hallstats_core::{
    BookingRecord, DayHourBucket, GroupField, MalformedPolicy, MonthOrder, Result, StatusCounts,
    Tally, aggregate,
};
use serde::Serialize;

/// Fill of the hall usage bars
pub const HALL_BAR_FILL: &str = "#2A2A72";
/// Stroke of the monthly trend line
pub const TREND_LINE_STROKE: &str = "#009FFD";
/// Event type slice colours, cycled by slice index
pub const EVENT_TYPE_PALETTE: [&str; 5] = ["#0088FE", "#FF8042", "#00C49F", "#FFBB28", "#845EC2"];
/// Requester type slice colours, cycled by slice index
pub const REQUESTER_TYPE_PALETTE: [&str; 4] = ["#3F72AF", "#F67280", "#C06C84", "#66DE93"];
/// Heatmap row order
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One headline number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiBox {
    /// Caption
    pub label: &'static str,
    /// Count shown
    pub value: u64,
    /// Background colour
    pub color: &'static str,
}

/// KPI boxes for total, approved, rejected and pending bookings
#[must_use]
pub fn kpi_boxes(counts: &StatusCounts) -> Vec<KpiBox> {
    vec![
        KpiBox {
            label: "Total Bookings",
            value: counts.total,
            color: "#1976d2",
        },
        KpiBox {
            label: "Approved",
            value: counts.approved,
            color: "#4caf50",
        },
        KpiBox {
            label: "Rejected",
            value: counts.rejected,
            color: "#f44336",
        },
        KpiBox {
            label: "Pending",
            value: counts.pending,
            color: "#ff9800",
        },
    ]
}

/// One hall's bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarPoint {
    /// Hall name
    pub hall: String,
    /// Bookings for the hall
    pub count: u64,
}

/// Bookings per hall
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChart {
    /// Bar colour
    pub fill: &'static str,
    /// Bars in first-seen order
    pub points: Vec<BarPoint>,
}

impl Default for BarChart {
    fn default() -> Self {
        Self {
            fill: HALL_BAR_FILL,
            points: Vec::new(),
        }
    }
}

impl BarChart {
    /// Largest bar, zero when empty
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }
}

/// One month of the trend line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinePoint {
    /// `YYYY-MM`
    pub month: String,
    /// Bookings dated in the month
    pub count: u64,
}

/// Bookings per month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineChart {
    /// Line colour
    pub stroke: &'static str,
    /// Points in the configured month order
    pub points: Vec<LinePoint>,
}

impl Default for LineChart {
    fn default() -> Self {
        Self {
            stroke: TREND_LINE_STROKE,
            points: Vec::new(),
        }
    }
}

impl LineChart {
    /// Highest point, zero when empty
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }
}

/// One pie slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    /// Category name
    #[serde(rename = "type")]
    pub label: String,
    /// Bookings in the category
    pub value: u64,
    /// Slice colour
    pub color: &'static str,
}

/// Share of bookings per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PieChart {
    /// Slices in first-seen order
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    fn from_tally(tally: &Tally, palette: &[&'static str]) -> Self {
        let slices = tally
            .iter()
            .zip(palette.iter().cycle())
            .map(|((label, value), &color)| PieSlice {
                label: label.to_string(),
                value,
                color,
            })
            .collect();
        Self { slices }
    }

    /// Sum of all slices
    #[must_use]
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// Bookings per weekday and start hour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heatmap {
    /// Non-empty cells in first-seen order
    pub buckets: Vec<DayHourBucket>,
    /// Largest cell count, zero when empty
    pub max_count: u64,
}

impl Heatmap {
    /// Count in the cell for `day` and `hour`
    #[must_use]
    pub fn count(&self, day: &str, hour: u32) -> u64 {
        self.buckets
            .iter()
            .find(|b| b.hour == hour && b.day_of_week == day)
            .map_or(0, |b| b.count)
    }
}

/// Hall usage bar chart
///
/// # Errors
///
/// Propagates [`MalformedPolicy::Strict`] failures from the aggregator.
pub fn hall_usage(records: &[BookingRecord], policy: MalformedPolicy) -> Result<BarChart> {
    let tally = aggregate::group_by_field(records, GroupField::HallName, policy)?;
    Ok(BarChart {
        points: tally
            .iter()
            .map(|(hall, count)| BarPoint {
                hall: hall.to_string(),
                count,
            })
            .collect(),
        ..BarChart::default()
    })
}

/// Monthly trend line chart
///
/// # Errors
///
/// Propagates [`MalformedPolicy::Strict`] failures from the aggregator.
pub fn monthly_trend(
    records: &[BookingRecord],
    policy: MalformedPolicy,
    order: MonthOrder,
) -> Result<LineChart> {
    let tally = aggregate::group_by_month(records, policy, order)?;
    Ok(LineChart {
        points: tally
            .iter()
            .map(|(month, count)| LinePoint {
                month: month.to_string(),
                count,
            })
            .collect(),
        ..LineChart::default()
    })
}

/// Event type pie chart
///
/// # Errors
///
/// Propagates [`MalformedPolicy::Strict`] failures from the aggregator.
pub fn event_types(records: &[BookingRecord], policy: MalformedPolicy) -> Result<PieChart> {
    let tally = aggregate::group_by_field(records, GroupField::EventType, policy)?;
    Ok(PieChart::from_tally(&tally, &EVENT_TYPE_PALETTE))
}

/// Requester type pie chart
///
/// # Errors
///
/// Propagates [`MalformedPolicy::Strict`] failures from the aggregator.
pub fn requester_types(records: &[BookingRecord], policy: MalformedPolicy) -> Result<PieChart> {
    let tally = aggregate::group_by_field(records, GroupField::RequesterType, policy)?;
    Ok(PieChart::from_tally(&tally, &REQUESTER_TYPE_PALETTE))
}

/// Day by hour heatmap
///
/// # Errors
///
/// Propagates [`MalformedPolicy::Strict`] failures from the aggregator.
pub fn day_hour_heatmap(records: &[BookingRecord], policy: MalformedPolicy) -> Result<Heatmap> {
    let buckets = aggregate::group_by_day_hour(records, policy)?;
    let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    Ok(Heatmap { buckets, max_count })
}
