//! Chart rendering for the dashboard.
//!
//! A [`Plot`] bundles one to three [`TimeSeries`](dash_core::TimeSeries) with
//! their styling and renders a PNG over a requested window.  Plots are looked
//! up by name through the [`PlotCatalog`].

mod draw;

pub mod catalog;
pub mod plot;

pub use catalog::PlotCatalog;
pub use plot::{Lines, Plot, Unit, YAxis};

use dash_config::RenderConfig;

/// Raster dimensions of every rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width:  u32,
    pub height: u32,
}

impl Canvas {
    /// Build a [`Canvas`] from the loaded configuration.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            width:  config.width,
            height: config.height,
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}
