use crate::draw::{self, Line};
use crate::Canvas;
use chrono::{DateTime, Local};
use dash_core::{DashError, PlotSummary, Result, TimeSeries};
use dash_system::{format_bytes, PointSink};
use dash_theme::{LineStyle, Theme};
use std::sync::Arc;

/// Vertical axis bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YAxis {
    /// Known domain, e.g. `0..100` for percentages.
    Fixed { min: f64, max: f64 },
    /// Fit the plotted data, always including zero.
    Auto,
}

/// How y-axis tick values are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Plain,
    Percent,
    Celsius,
    BytesPerSecond,
}

impl Unit {
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Plain => format!("{value:.2}"),
            Self::Percent => format!("{value:.0}%"),
            Self::Celsius => format!("{value:.0}°C"),
            Self::BytesPerSecond => format!("{}/s", format_bytes(value.max(0.0) as u64)),
        }
    }
}

/// `N` series drawn on one chart.  Each series is labelled by its name.
#[derive(Debug, Clone)]
pub struct Lines<const N: usize> {
    title:  String,
    series: [Arc<TimeSeries>; N],
    styles: [LineStyle; N],
    y_axis: YAxis,
    unit:   Unit,
}

impl<const N: usize> Lines<N> {
    pub fn new(title: impl Into<String>, series: [Arc<TimeSeries>; N], styles: [LineStyle; N]) -> Self {
        Self {
            title: title.into(),
            series,
            styles,
            y_axis: YAxis::Auto,
            unit: Unit::Plain,
        }
    }

    #[must_use]
    pub fn y_axis(mut self, y_axis: YAxis) -> Self {
        self.y_axis = y_axis;
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn series(&self) -> &[Arc<TimeSeries>; N] {
        &self.series
    }

    /// Push one value into each series at the same instant.
    pub fn add_point(&self, timestamp: DateTime<Local>, values: [f64; N]) {
        self.series.add_point(timestamp, values);
    }

    /// Render the last `window` points of every series (`<= 0` = all).
    ///
    /// Series are snapshotted one at a time; no lock is held while drawing.
    pub fn render(&self, window: i64, canvas: Canvas, theme: &Theme) -> Result<Vec<u8>> {
        let mut lines = Vec::with_capacity(N);
        for (series, style) in self.series.iter().zip(&self.styles) {
            let points = series.window(window);
            if points.is_empty() {
                return Err(DashError::EmptySeries(series.name().to_string()));
            }
            lines.push(Line {
                label: series.name(),
                style: *style,
                points,
            });
        }

        draw::render_png(&self.title, &lines, self.y_axis, self.unit, canvas, theme)
    }

    fn summary(&self, name: &str) -> PlotSummary {
        PlotSummary {
            name:   name.to_string(),
            title:  self.title.clone(),
            series: self.series.iter().map(|s| s.summary()).collect(),
        }
    }
}

/// Collectors feed a plot through its typed update.
impl<const N: usize> PointSink<N> for Lines<N> {
    fn add_point(&self, timestamp: DateTime<Local>, values: [f64; N]) {
        Lines::add_point(self, timestamp, values);
    }
}

/// A chart definition, tagged by how many values each sample carries.
#[derive(Debug, Clone)]
pub enum Plot {
    Single(Lines<1>),
    Dual(Lines<2>),
    Triple(Lines<3>),
}

impl Plot {
    pub fn title(&self) -> &str {
        match self {
            Self::Single(l) => l.title(),
            Self::Dual(l) => l.title(),
            Self::Triple(l) => l.title(),
        }
    }

    pub fn render(&self, window: i64, canvas: Canvas, theme: &Theme) -> Result<Vec<u8>> {
        match self {
            Self::Single(l) => l.render(window, canvas, theme),
            Self::Dual(l) => l.render(window, canvas, theme),
            Self::Triple(l) => l.render(window, canvas, theme),
        }
    }

    pub fn summary(&self, name: &str) -> PlotSummary {
        match self {
            Self::Single(l) => l.summary(name),
            Self::Dual(l) => l.summary(name),
            Self::Triple(l) => l.summary(name),
        }
    }
}

impl From<Lines<1>> for Plot {
    fn from(lines: Lines<1>) -> Self {
        Self::Single(lines)
    }
}

impl From<Lines<2>> for Plot {
    fn from(lines: Lines<2>) -> Self {
        Self::Dual(lines)
    }
}

impl From<Lines<3>> for Plot {
    fn from(lines: Lines<3>) -> Self {
        Self::Triple(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dash_theme::style;

    fn at(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn network() -> Lines<2> {
        Lines::new(
            "Network",
            [
                Arc::new(TimeSeries::new("Rx", 10)),
                Arc::new(TimeSeries::new("Tx", 10)),
            ],
            [style::NET_RX, style::NET_TX],
        )
        .unit(Unit::BytesPerSecond)
    }

    #[test]
    fn add_point_feeds_every_series() {
        let lines = network();
        lines.add_point(at(1), [1_024.0, 2_048.0]);
        lines.add_point(at(2), [0.0, 10.0]);

        let [rx, tx] = lines.series();
        assert_eq!(rx.all().iter().map(|p| p.value).collect::<Vec<_>>(), vec![1_024.0, 0.0]);
        assert_eq!(tx.latest().unwrap().value, 10.0);
    }

    #[test]
    fn collector_feeds_plot_through_add_point() {
        use dash_system::{Collector, FnProvider};
        use std::time::Duration;

        let lines = network();
        let provider = FnProvider(|| -> Result<[f64; 2]> { Ok([512.0, 64.0]) });
        let mut collector =
            Collector::new("network", provider, Duration::from_secs(1), lines.clone());

        collector.tick(at(1));
        let [rx, tx] = lines.series();
        assert_eq!(rx.latest().unwrap().value, 512.0);
        assert_eq!(tx.latest().unwrap().timestamp, at(1));
    }

    #[test]
    fn render_fails_when_any_series_is_empty() {
        let lines = network();
        lines.series()[0].push(at(1), 5.0);

        let err = lines.render(-1, Canvas::default(), &Theme::default()).unwrap_err();
        assert!(matches!(err, DashError::EmptySeries(ref name) if name == "Tx"));
    }

    #[test]
    fn render_fails_on_fresh_plot() {
        let plot = Plot::from(network());
        let err = plot.render(10, Canvas::default(), &Theme::default()).unwrap_err();
        assert!(matches!(err, DashError::EmptySeries(_)));
    }

    #[test]
    fn unit_labels() {
        assert_eq!(Unit::Percent.format(42.4), "42%");
        assert_eq!(Unit::Celsius.format(55.0), "55°C");
        assert_eq!(Unit::BytesPerSecond.format(2_048.0), "2.0 KiB/s");
        assert_eq!(Unit::BytesPerSecond.format(-1.0), "0 B/s");
        assert_eq!(Unit::Plain.format(0.5), "0.50");
    }

    #[test]
    fn summary_lists_series_in_order() {
        let plot = Plot::from(network());
        if let Plot::Dual(lines) = &plot {
            lines.add_point(at(3), [7.0, 8.0]);
        }

        let summary = plot.summary("network");
        assert_eq!(summary.name, "network");
        assert_eq!(summary.title, "Network");
        let labels: Vec<_> = summary.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Rx", "Tx"]);
        assert_eq!(summary.series[1].latest, Some(8.0));
    }
}
