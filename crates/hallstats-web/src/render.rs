//! HTML and plain text rendering of a [`DashboardView`]
//!
//! The page itself lives in `templates/dashboard.html`; this module turns the
//! chart models into SVG geometry the template can print directly.

use crate::{
    charts::{BarChart, Heatmap, LineChart, PieChart, WEEKDAYS},
    dashboard::DashboardView,
};
use askama::Template;
use std::fmt::{self, Display, Formatter};

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 300.0;
const CHART_MARGIN: f64 = 40.0;
const PIE_RADIUS: f64 = 110.0;
const PIE_CENTER: f64 = PIE_RADIUS + 10.0;

/// Sidebar link
#[derive(Debug, Clone, Copy)]
pub struct SidebarEntry {
    /// Section id
    pub anchor: &'static str,
    /// Link text
    pub label: &'static str,
}

const SIDEBAR: [SidebarEntry; 5] = [
    SidebarEntry { anchor: "overview", label: "Overview" },
    SidebarEntry { anchor: "halls", label: "Hall Insights" },
    SidebarEntry { anchor: "trends", label: "Trends" },
    SidebarEntry { anchor: "events", label: "Event Types" },
    SidebarEntry { anchor: "requesters", label: "Requester Types" },
];

/// One bar of the hall usage chart, in SVG user units
#[derive(Debug, Clone, PartialEq)]
pub struct BarShape {
    /// Hall name
    pub hall: String,
    /// Bookings for the hall
    pub count: u64,
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Bar width
    pub width: f64,
    /// Bar height
    pub height: f64,
    /// Horizontal centre, where the label goes
    pub label_x: f64,
}

/// One point of the trend line
#[derive(Debug, Clone, PartialEq)]
pub struct LineMarker {
    /// `YYYY-MM`
    pub month: String,
    /// Bookings in the month
    pub count: u64,
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

/// Monthly trend line geometry
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    /// Line colour
    pub stroke: &'static str,
    /// `points` attribute of the polyline
    pub points: String,
    /// One marker per month
    pub markers: Vec<LineMarker>,
}

/// One pie slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSegment {
    /// Category name
    pub label: String,
    /// Bookings in the category
    pub value: u64,
    /// Slice colour
    pub color: &'static str,
    /// The slice is the whole pie and is drawn as a circle
    pub full: bool,
    /// SVG path of the wedge, empty when `full`
    pub path: String,
}

/// A titled pie chart section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSection {
    /// Section id, matching a sidebar anchor
    pub anchor: &'static str,
    /// Heading
    pub title: &'static str,
    /// Slices; empty when there is no data
    pub segments: Vec<PieSegment>,
}

/// One heatmap cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatCell {
    /// Hour of day
    pub hour: u32,
    /// Bookings starting in the slot
    pub count: u64,
    /// Fill opacity, scaled to the busiest slot
    pub alpha: f64,
}

/// One weekday row of the heatmap
#[derive(Debug, Clone, PartialEq)]
pub struct HeatRow {
    /// Weekday name
    pub day: &'static str,
    /// 24 cells, midnight first
    pub cells: Vec<HeatCell>,
}

/// Full dashboard page
#[derive(Debug, Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    /// View the page is rendered from
    pub view: &'a DashboardView,
    /// Navigation links
    pub sidebar: &'static [SidebarEntry],
    /// Bar and line chart width
    pub width: f64,
    /// Bar and line chart height
    pub height: f64,
    /// Baseline of axis labels
    pub label_y: f64,
    /// Hall usage bar colour
    pub bar_fill: &'static str,
    /// Hall usage bars
    pub bars: Vec<BarShape>,
    /// Monthly trend line
    pub trend: LineShape,
    /// Event and requester type pies
    pub pies: Vec<PieSection>,
    /// Pie centre coordinate, both axes
    pub pie_center: f64,
    /// Pie radius
    pub pie_radius: f64,
    /// Pie viewport edge length
    pub pie_size: f64,
    /// Heatmap column headers
    pub hours: Vec<u32>,
    /// Heatmap rows; empty when there is no data
    pub heat_rows: Vec<HeatRow>,
}

impl<'a> DashboardTemplate<'a> {
    /// Lay out every chart of `view`
    #[must_use]
    pub fn new(view: &'a DashboardView) -> Self {
        Self {
            view,
            sidebar: &SIDEBAR,
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            label_y: CHART_HEIGHT - CHART_MARGIN + 14.0,
            bar_fill: view.hall_usage.fill,
            bars: bar_shapes(&view.hall_usage),
            trend: line_shape(&view.monthly_trend),
            pies: vec![
                PieSection {
                    anchor: "events",
                    title: "Event Types",
                    segments: pie_segments(&view.event_types),
                },
                PieSection {
                    anchor: "requesters",
                    title: "Requester Types",
                    segments: pie_segments(&view.requester_types),
                },
            ],
            pie_center: PIE_CENTER,
            pie_radius: PIE_RADIUS,
            pie_size: 2.0 * PIE_CENTER,
            hours: (0..24).collect(),
            heat_rows: heat_rows(&view.heatmap),
        }
    }
}

/// Render the dashboard as a standalone HTML document
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_page(view: &DashboardView) -> askama::Result<String> {
    DashboardTemplate::new(view).render()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[allow(clippy::cast_precision_loss)]
fn bar_shapes(chart: &BarChart) -> Vec<BarShape> {
    if chart.points.is_empty() {
        return Vec::new();
    }

    let max = chart.max_count().max(1) as f64;
    let plot_height = CHART_HEIGHT - 2.0 * CHART_MARGIN;
    let slot = (CHART_WIDTH - 2.0 * CHART_MARGIN) / chart.points.len() as f64;
    let width = slot * 0.7;

    chart
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let height = point.count as f64 / max * plot_height;
            let x = CHART_MARGIN + slot * i as f64 + (slot - width) / 2.0;
            BarShape {
                hall: point.hall.clone(),
                count: point.count,
                x: round1(x),
                y: round1(CHART_HEIGHT - CHART_MARGIN - height),
                width: round1(width),
                height: round1(height),
                label_x: round1(x + width / 2.0),
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn line_shape(chart: &LineChart) -> LineShape {
    let max = chart.max_count().max(1) as f64;
    let plot_height = CHART_HEIGHT - 2.0 * CHART_MARGIN;
    let step = if chart.points.len() > 1 {
        (CHART_WIDTH - 2.0 * CHART_MARGIN) / (chart.points.len() - 1) as f64
    } else {
        0.0
    };

    let markers: Vec<LineMarker> = chart
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| LineMarker {
            month: point.month.clone(),
            count: point.count,
            x: round1(CHART_MARGIN + step * i as f64),
            y: round1(CHART_HEIGHT - CHART_MARGIN - point.count as f64 / max * plot_height),
        })
        .collect();

    let points = markers
        .iter()
        .map(|m| format!("{},{}", m.x, m.y))
        .collect::<Vec<_>>()
        .join(" ");

    LineShape {
        stroke: chart.stroke,
        points,
        markers,
    }
}

#[allow(clippy::cast_precision_loss)]
fn pie_segments(chart: &PieChart) -> Vec<PieSegment> {
    let total = chart.total();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = -std::f64::consts::FRAC_PI_2;
    chart
        .slices
        .iter()
        .map(|slice| {
            let full = slice.value == total;
            let sweep = slice.value as f64 / total as f64 * std::f64::consts::TAU;
            let (x0, y0) = (
                PIE_CENTER + PIE_RADIUS * angle.cos(),
                PIE_CENTER + PIE_RADIUS * angle.sin(),
            );
            angle += sweep;
            let (x1, y1) = (
                PIE_CENTER + PIE_RADIUS * angle.cos(),
                PIE_CENTER + PIE_RADIUS * angle.sin(),
            );
            let large_arc = u8::from(sweep > std::f64::consts::PI);

            PieSegment {
                label: slice.label.clone(),
                value: slice.value,
                color: slice.color,
                full,
                path: if full {
                    String::new()
                } else {
                    format!(
                        "M{PIE_CENTER},{PIE_CENTER} L{x0:.2},{y0:.2} \
                         A{PIE_RADIUS},{PIE_RADIUS} 0 {large_arc} 1 {x1:.2},{y1:.2} Z"
                    )
                },
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn heat_rows(heatmap: &Heatmap) -> Vec<HeatRow> {
    if heatmap.buckets.is_empty() {
        return Vec::new();
    }

    let max = heatmap.max_count.max(1) as f64;
    WEEKDAYS
        .iter()
        .map(|&day| HeatRow {
            day,
            cells: (0..24)
                .map(|hour| {
                    let count = heatmap.count(day, hour);
                    let alpha = if count == 0 {
                        0.0
                    } else {
                        (0.15 + 0.85 * (count as f64 / max)) * 100.0
                    };
                    HeatCell {
                        hour,
                        count,
                        alpha: alpha.round() / 100.0,
                    }
                })
                .collect(),
        })
        .collect()
}

/// Plain text summary used by the `report` command
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a>(pub &'a DashboardView);

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let view = self.0;

        writeln!(f, "Booking overview")?;
        for kpi in &view.kpis {
            writeln!(f, "  {:<24}{:>8}", kpi.label, kpi.value)?;
        }
        if view.status_counts.other > 0 {
            writeln!(f, "  {:<24}{:>8}", "Other status", view.status_counts.other)?;
        }

        write_section(
            f,
            "Hall usage",
            view.hall_usage.points.iter().map(|p| (p.hall.as_str(), p.count)),
        )?;
        write_section(
            f,
            "Monthly trend",
            view.monthly_trend.points.iter().map(|p| (p.month.as_str(), p.count)),
        )?;
        write_section(
            f,
            "Event types",
            view.event_types.slices.iter().map(|s| (s.label.as_str(), s.value)),
        )?;
        write_section(
            f,
            "Requester types",
            view.requester_types.slices.iter().map(|s| (s.label.as_str(), s.value)),
        )?;

        let slots: Vec<_> = view
            .heatmap
            .buckets
            .iter()
            .map(|b| (b.key(), b.count))
            .collect();
        write_section(f, "Day/hour slots", slots.iter().map(|(k, c)| (k.as_str(), *c)))?;

        let report = &view.report;
        if !report.is_clean() {
            writeln!(
                f,
                "\n{} of {} records had an unusable date, {} an unusable start time",
                report.invalid_dates, report.records, report.invalid_start_times
            )?;
        }
        Ok(())
    }
}

fn write_section<'a>(
    f: &mut Formatter<'_>,
    title: &str,
    rows: impl Iterator<Item = (&'a str, u64)>,
) -> fmt::Result {
    writeln!(f, "\n{title}")?;
    let mut empty = true;
    for (key, count) in rows {
        empty = false;
        writeln!(f, "  {key:<24}{count:>8}")?;
    }
    if empty {
        writeln!(f, "  (none)")?;
    }
    Ok(())
}
