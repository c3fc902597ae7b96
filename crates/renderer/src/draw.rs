use crate::plot::{Unit, YAxis};
use crate::Canvas;
use chrono::{Local, TimeZone};
use dash_core::{DashError, Datapoint, Result};
use dash_theme::{LineStyle, Theme, FONT_FAMILY};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::*;

/// One snapshotted series ready to draw.
pub(crate) struct Line<'a> {
    pub label:  &'a str,
    pub style:  LineStyle,
    pub points: Vec<Datapoint>,
}

fn render_err(e: impl std::fmt::Display) -> DashError {
    DashError::Render(e.to_string())
}

/// Seconds since the epoch, as the chart's x coordinate.
fn x_of(p: &Datapoint) -> f64 {
    p.timestamp.timestamp_millis() as f64 / 1000.0
}

fn time_label(x: f64, format: &str) -> String {
    Local
        .timestamp_millis_opt((x * 1000.0) as i64)
        .single()
        .map(|t| t.format(format).to_string())
        .unwrap_or_default()
}

/// Time span covered by all lines; a single instant is widened to one second.
fn x_range(lines: &[Line<'_>]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for p in lines.iter().flat_map(|l| &l.points) {
        lo = lo.min(x_of(p));
        hi = hi.max(x_of(p));
    }
    if hi <= lo {
        hi = lo + 1.0;
    }
    (lo, hi)
}

fn y_range(lines: &[Line<'_>], axis: YAxis) -> (f64, f64) {
    match axis {
        YAxis::Fixed { min, max } => (min, max),
        YAxis::Auto => {
            let max = lines
                .iter()
                .flat_map(|l| &l.points)
                .map(|p| p.value)
                .fold(f64::NEG_INFINITY, f64::max);
            let min = lines
                .iter()
                .flat_map(|l| &l.points)
                .map(|p| p.value)
                .fold(f64::INFINITY, f64::min)
                .min(0.0);
            let max = if max.is_finite() { max * 1.1 } else { 1.0 };
            if max <= min {
                (min, min + 1.0)
            } else {
                (min, max)
            }
        }
    }
}

/// Draw `lines` onto a fresh canvas and encode it as PNG.
///
/// Callers guarantee every line has at least one point.
pub(crate) fn render_png(
    title: &str,
    lines: &[Line<'_>],
    y_axis: YAxis,
    unit: Unit,
    canvas: Canvas,
    theme: &Theme,
) -> Result<Vec<u8>> {
    let (width, height) = (canvas.width, canvas.height);
    let mut pixels = vec![0u8; width as usize * height as usize * 3];

    let (x0, x1) = x_range(lines);
    let (y0, y1) = y_range(lines, y_axis);
    let fmt_x = |x: &f64| time_label(*x, &theme.time_format);
    let fmt_y = |y: &f64| unit.format(*y);

    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&theme.background.to_rgb()).map_err(render_err)?;

        let caption = (FONT_FAMILY, theme.title_font_size)
            .into_font()
            .style(FontStyle::Bold)
            .color(&theme.title_color.to_rgb());

        let mut chart = ChartBuilder::on(&root)
            .caption(title, caption)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .light_line_style(theme.grid_color.to_rgb().stroke_width(1))
            .bold_line_style(theme.grid_color.to_rgb().mix(0.6).stroke_width(1))
            .x_labels(6)
            .y_labels(5)
            .x_label_formatter(&fmt_x)
            .y_label_formatter(&fmt_y)
            .label_style((FONT_FAMILY, theme.label_font_size))
            .draw()
            .map_err(render_err)?;

        for line in lines {
            let shape = line.style.shape();
            chart
                .draw_series(LineSeries::new(
                    line.points.iter().map(|p| (x_of(p), p.value)),
                    shape,
                ))
                .map_err(render_err)?
                .label(line.label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], shape));
        }

        if lines.len() > 1 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK.mix(0.4))
                .label_font((FONT_FAMILY, theme.label_font_size))
                .draw()
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| DashError::Encoding(e.to_string()))?;

    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use dash_theme::style;

    fn at(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn line(values: &[(i64, f64)]) -> Line<'static> {
        Line {
            label: "test",
            style: style::CPU_TEMP,
            points: values.iter().map(|&(t, v)| Datapoint::new(at(t), v)).collect(),
        }
    }

    #[test]
    fn single_instant_is_widened() {
        let (lo, hi) = x_range(&[line(&[(5, 1.0)])]);
        assert_eq!(hi - lo, 1.0);
    }

    #[test]
    fn x_range_spans_all_lines() {
        let (lo, hi) = x_range(&[line(&[(2, 1.0), (4, 1.0)]), line(&[(1, 0.0), (3, 0.0)])]);
        assert_eq!(hi - lo, 3.0);
    }

    #[test]
    fn auto_y_range_includes_zero_and_headroom() {
        let (lo, hi) = y_range(&[line(&[(1, 10.0), (2, 20.0)])], YAxis::Auto);
        assert_eq!(lo, 0.0);
        assert!((hi - 22.0).abs() < 1e-9);

        let (lo, _) = y_range(&[line(&[(1, -5.0), (2, 5.0)])], YAxis::Auto);
        assert_eq!(lo, -5.0);
    }

    #[test]
    fn flat_zero_series_gets_a_nonempty_y_range() {
        let (lo, hi) = y_range(&[line(&[(1, 0.0), (2, 0.0)])], YAxis::Auto);
        assert_eq!((lo, hi), (0.0, 1.0));
    }

    #[test]
    fn fixed_y_range_is_kept() {
        let fixed = YAxis::Fixed { min: 0.0, max: 100.0 };
        assert_eq!(y_range(&[line(&[(1, 150.0)])], fixed), (0.0, 100.0));
    }

    #[test]
    fn time_labels_use_the_configured_format() {
        let x = x_of(&Datapoint::new(at(0), 0.0));
        assert_eq!(time_label(x, "%H:%M:%S"), at(0).format("%H:%M:%S").to_string());
    }
}
