use crate::{Canvas, Plot};
use dash_core::{DashError, PlotSummary, Result};
use dash_theme::Theme;
use std::collections::BTreeMap;

/// Name → [`Plot`] registry, built once at startup and read-only afterwards.
#[derive(Debug)]
pub struct PlotCatalog {
    plots:  BTreeMap<String, Plot>,
    canvas: Canvas,
    theme:  Theme,
}

impl PlotCatalog {
    /// Register `plots` under their names.  A duplicate name is a
    /// configuration error.
    pub fn new<I, S>(plots: I, canvas: Canvas, theme: Theme) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Plot)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (name, plot) in plots {
            let name = name.into();
            if map.contains_key(&name) {
                return Err(DashError::Config(format!("plot '{name}' registered twice")));
            }
            map.insert(name, plot);
        }
        Ok(Self { plots: map, canvas, theme })
    }

    pub fn get(&self, name: &str) -> Result<&Plot> {
        self.plots
            .get(name)
            .ok_or_else(|| DashError::NotFound(name.to_string()))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    /// PNG of plot `name` over the last `window` points.
    ///
    /// `window` of `-1` or `0` means every retained point.  Unknown names
    /// yield [`DashError::NotFound`]; empty series and drawing or encoding
    /// failures yield internal errors.
    pub fn plot_image(&self, name: &str, window: i64) -> Result<Vec<u8>> {
        let plot = self.get(name)?;
        let png = plot.render(window, self.canvas, &self.theme)?;
        tracing::debug!(plot = name, window, bytes = png.len(), "rendered plot");
        Ok(png)
    }

    /// Latest values and time bounds of every plot.
    pub fn summary(&self) -> Vec<PlotSummary> {
        self.plots
            .iter()
            .map(|(name, plot)| plot.summary(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lines, Unit, YAxis};
    use chrono::{Local, TimeZone};
    use dash_core::TimeSeries;
    use dash_theme::style;
    use std::sync::Arc;

    fn catalog() -> (PlotCatalog, Arc<TimeSeries>) {
        let temp = Arc::new(TimeSeries::new("cpuTemp", 10));
        let cpu = Lines::new("CPU Temperature", [Arc::clone(&temp)], [style::CPU_TEMP])
            .y_axis(YAxis::Fixed { min: 0.0, max: 100.0 })
            .unit(Unit::Celsius);
        let load = Lines::new(
            "Load Average",
            [
                Arc::new(TimeSeries::new("Avg1", 10)),
                Arc::new(TimeSeries::new("Avg5", 10)),
                Arc::new(TimeSeries::new("Avg15", 10)),
            ],
            [style::LOAD_1, style::LOAD_5, style::LOAD_15],
        );

        let catalog = PlotCatalog::new(
            [("cpuTemp", Plot::from(cpu)), ("loadAvg", Plot::from(load))],
            Canvas::default(),
            Theme::default(),
        )
        .unwrap();
        (catalog, temp)
    }

    #[test]
    fn unknown_name_is_not_found() {
        let (catalog, _) = catalog();
        let err = catalog.get("bogus").unwrap_err();
        assert!(err.is_not_found());
        assert!(catalog.plot_image("bogus", -1).unwrap_err().is_not_found());
    }

    #[test]
    fn registered_name_returns_configured_plot() {
        let (catalog, _) = catalog();
        let plot = catalog.get("cpuTemp").unwrap();
        assert_eq!(plot.title(), "CPU Temperature");
        assert!(matches!(plot, Plot::Single(_)));
        assert!(matches!(catalog.get("loadAvg").unwrap(), Plot::Triple(_)));
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["cpuTemp", "loadAvg"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let a = Lines::new("A", [Arc::new(TimeSeries::new("a", 1))], [style::MEMORY]);
        let err = PlotCatalog::new(
            [("memoryUsage", Plot::from(a.clone())), ("memoryUsage", Plot::from(a))],
            Canvas::default(),
            Theme::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DashError::Config(_)));
    }

    #[test]
    fn empty_series_is_an_internal_error() {
        let (catalog, _) = catalog();
        let err = catalog.plot_image("cpuTemp", -1).unwrap_err();
        assert!(matches!(err, DashError::EmptySeries(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn renders_png_for_populated_plot() {
        let (catalog, temp) = catalog();
        for i in 0..20 {
            let t = Local.timestamp_opt(1_700_000_000 + i, 0).unwrap();
            temp.push(t, 40.0 + (i % 7) as f64);
        }

        for window in [-1, 0, 5] {
            let png = catalog.plot_image("cpuTemp", window).unwrap();
            assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        }
    }

    /// Width and height from the PNG's IHDR chunk.
    fn png_size(png: &[u8]) -> (u32, u32) {
        let be = |b: &[u8]| u32::from_be_bytes(b.try_into().unwrap());
        (be(&png[16..20]), be(&png[20..24]))
    }

    #[test]
    fn renders_at_the_configured_canvas_size() {
        let (catalog, temp) = catalog();
        temp.push(Local.timestamp_opt(1_700_000_000, 0).unwrap(), 48.0);

        let png = catalog.plot_image("cpuTemp", -1).unwrap();
        let canvas = Canvas::default();
        assert_eq!(png_size(&png), (canvas.width, canvas.height));
        assert_eq!(png_size(&png), (800, 240));

        let small = Canvas { width: 400, height: 120 };
        let cpu = Lines::new("CPU Temperature", [Arc::clone(&temp)], [style::CPU_TEMP]);
        let catalog =
            PlotCatalog::new([("cpuTemp", Plot::from(cpu))], small, Theme::default()).unwrap();
        let png = catalog.plot_image("cpuTemp", 1).unwrap();
        assert_eq!(png_size(&png), (400, 120));
    }

    #[test]
    fn summary_covers_every_plot() {
        let (catalog, temp) = catalog();
        temp.push(Local.timestamp_opt(1_700_000_000, 0).unwrap(), 51.0);

        let summary = catalog.summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].name, "cpuTemp");
        assert_eq!(summary[0].series[0].latest, Some(51.0));
        assert_eq!(summary[1].series.len(), 3);
        assert!(summary[1].series.iter().all(|s| s.latest.is_none()));
    }
}
