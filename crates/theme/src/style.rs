use crate::colors::Color;
use plotters::style::{Color as _, ShapeStyle};

/// Stroke settings for one plotted series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl LineStyle {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// plotters stroke; widths are rounded up to whole pixels.
    pub fn shape(&self) -> ShapeStyle {
        self.color.to_rgba().stroke_width(self.width.ceil().max(1.0) as u32)
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0, 0, 0),
            width: 1.2,
        }
    }
}

// Per-series palette.
pub const CPU_TEMP:  LineStyle = LineStyle::new(Color::rgb(216, 87, 42), 1.5);
pub const MEMORY:    LineStyle = LineStyle::new(Color::rgb(37, 137, 189), 1.2);
pub const NET_RX:    LineStyle = LineStyle::new(Color::rgb(232, 141, 103), 1.2);
pub const NET_TX:    LineStyle = LineStyle::new(Color::rgb(153, 153, 195), 1.2);
pub const LOAD_1:    LineStyle = LineStyle::new(Color::rgb(113, 124, 137), 1.2);
pub const LOAD_5:    LineStyle = LineStyle::new(Color::rgb(144, 186, 173), 1.2);
pub const LOAD_15:   LineStyle = LineStyle::new(Color::rgb(173, 246, 177), 1.2);
pub const DISK_DATA: LineStyle = LineStyle::new(Color::rgb(43, 89, 195), 1.2);
pub const DISK_ROOT: LineStyle = LineStyle::new(Color::rgb(211, 101, 130), 1.2);
pub const DISK_BOOT: LineStyle = LineStyle::new(Color::rgb(187, 219, 155), 1.2);
