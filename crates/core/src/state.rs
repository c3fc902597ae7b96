use chrono::{DateTime, Local};
use serde::Serialize;

/// Point-in-time view of one plot, used for the dashboard's headline numbers
/// and for bounding the range picker.
#[derive(Debug, Clone, Serialize)]
pub struct PlotSummary {
    /// Catalog name, e.g. `"cpuTemp"`.
    pub name: String,
    /// Human-readable chart title.
    pub title: String,
    pub series: Vec<SeriesSummary>,
}

/// Boundary values of a single series.  All fields are `None` while the
/// series is still empty.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesSummary {
    pub label: String,
    pub points: usize,
    pub capacity: usize,
    /// Most recent value.
    pub latest: Option<f64>,
    pub earliest_at: Option<DateTime<Local>>,
    pub latest_at: Option<DateTime<Local>>,
}
