use crate::compare::ComparisonTable;
use crate::config::ReportOptions;
use crate::error::TijError;
use rust_decimal::prelude::ToPrimitive;
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::debug;

/// Fraction of a metric group's width taken by one bar.
const BAR_WIDTH: f32 = 0.35;

/// Plot rectangle in raster pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A y-axis tick: the value and its raster row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub y: f32,
}

/// Rendered grouped bar chart plus the geometry needed to label it.
///
/// The raster holds bars, axes and grid only; titles, tick labels and the
/// legend are placed as text by whoever embeds the image.
pub struct ChartImage {
    pub pixmap: Pixmap,
    pub png: Vec<u8>,
    pub plot: PlotArea,
    /// Horizontal center of each metric's bar group, in table row order.
    pub group_centers: Vec<f32>,
    pub ticks: Vec<Tick>,
    pub colors: [[u8; 3]; 2],
}

impl ChartImage {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Opaque RGB pixel data, row-major.
    pub fn rgb(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.pixels().len() * 3);
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue()]);
        }
        out
    }
}

/// Render one bar pair per metric, first period left, second period right,
/// in the table's scaled units.
pub fn render_chart(table: &ComparisonTable, options: &ReportOptions) -> Result<ChartImage, TijError> {
    let width = options.chart_width;
    let height = options.chart_height;
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| TijError::Render(format!("invalid chart size {width}x{height}")))?;
    pixmap.fill(Color::WHITE);

    let (w, h) = (width as f32, height as f32);
    let plot = PlotArea {
        x: w * 0.14,
        y: h * 0.12,
        width: w * 0.82,
        height: h * 0.74,
    };

    let series: Vec<(f64, f64)> = table
        .rows
        .iter()
        .map(|r| {
            (
                r.value1.to_f64().unwrap_or_default(),
                r.value2.to_f64().unwrap_or_default(),
            )
        })
        .collect();

    let (min, max, step) = axis_range(series.iter().flat_map(|&(a, b)| [a, b]));
    let to_y = |v: f64| plot.y + plot.height * ((max - v) / (max - min)) as f32;

    let ticks: Vec<Tick> = tick_values(min, max, step)
        .into_iter()
        .map(|value| Tick {
            value,
            y: to_y(value),
        })
        .collect();

    // Grid
    let mut grid = Paint::default();
    grid.set_color_rgba8(220, 220, 220, 255);
    let thin = Stroke {
        width: 1.0,
        ..Stroke::default()
    };
    for tick in &ticks {
        draw_line(&mut pixmap, (plot.x, tick.y), (plot.x + plot.width, tick.y), &grid, &thin);
    }

    // Bars
    let group_width = plot.width / series.len().max(1) as f32;
    let bar_width = group_width * BAR_WIDTH;
    let baseline = to_y(0.0);
    let colors = [options.first_color, options.second_color];
    let mut group_centers = Vec::with_capacity(series.len());

    for (i, &(v1, v2)) in series.iter().enumerate() {
        let center = plot.x + group_width * (i as f32 + 0.5);
        group_centers.push(center);
        fill_bar(&mut pixmap, center - bar_width, bar_width, to_y(v1), baseline, colors[0]);
        fill_bar(&mut pixmap, center, bar_width, to_y(v2), baseline, colors[1]);
    }

    // Axes
    let mut axis = Paint::default();
    axis.set_color_rgba8(0, 0, 0, 255);
    let axis_stroke = Stroke {
        width: 1.5,
        ..Stroke::default()
    };
    draw_line(&mut pixmap, (plot.x, plot.y), (plot.x, plot.y + plot.height), &axis, &axis_stroke);
    draw_line(&mut pixmap, (plot.x, baseline), (plot.x + plot.width, baseline), &axis, &axis_stroke);

    let png = pixmap
        .encode_png()
        .map_err(|e| TijError::Render(format!("PNG encoding failed: {}", e)))?;
    debug!(width, height, bytes = png.len(), "rendered chart");

    Ok(ChartImage {
        pixmap,
        png,
        plot,
        group_centers,
        ticks,
        colors,
    })
}

/// Axis bounds that include zero, widened to a whole number of "nice" steps.
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64, f64) {
    let (mut lo, mut hi) = (0.0_f64, 0.0_f64);
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if hi - lo <= f64::EPSILON {
        hi = lo + 1.0;
    }

    let step = nice_step((hi - lo) / 5.0);
    ((lo / step).floor() * step, (hi / step).ceil() * step, step)
}

/// Round a raw step up to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn tick_values(min: f64, max: f64, step: f64) -> Vec<f64> {
    let count = ((max - min) / step).round() as usize;
    (0..=count).map(|i| min + step * i as f64).collect()
}

fn fill_bar(pixmap: &mut Pixmap, x: f32, width: f32, y_value: f32, baseline: f32, color: [u8; 3]) {
    let top = y_value.min(baseline);
    let height = (y_value - baseline).abs();
    // Zero-height bars have no rectangle to draw.
    if let Some(rect) = Rect::from_xywh(x, top, width, height) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color[0], color[1], color[2], 255);
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
}

fn draw_line(pixmap: &mut Pixmap, from: (f32, f32), to: (f32, f32), paint: &Paint, stroke: &Stroke) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.0, from.1);
    pb.line_to(to.0, to.1);
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, paint, stroke, Transform::identity(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ComparisonRow;
    use crate::model::{Metric, PeriodLabel};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn table(values: [(Decimal, Decimal); 3]) -> ComparisonTable {
        ComparisonTable {
            label1: PeriodLabel::new("Tij092430"),
            label2: PeriodLabel::new("Tij102431"),
            rows: Metric::ALL
                .iter()
                .zip(values)
                .map(|(&metric, (value1, value2))| ComparisonRow {
                    metric,
                    value1,
                    value2,
                    delta: value2 - value1,
                })
                .collect(),
        }
    }

    fn pixel(chart: &ChartImage, x: f32, y: f32) -> [u8; 3] {
        let c = chart
            .pixmap
            .pixel(x as u32, y as u32)
            .unwrap()
            .demultiply();
        [c.red(), c.green(), c.blue()]
    }

    #[test]
    fn test_nice_step() {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(close(nice_step(267.0), 500.0));
        assert!(close(nice_step(0.3), 0.5));
        assert!(close(nice_step(13.0), 20.0));
        assert!(close(nice_step(1.0), 1.0));
    }

    #[test]
    fn test_axis_range_includes_zero() {
        let (min, max, step) = axis_range([1235.0, 1335.0, 45.67].into_iter());
        assert_eq!(min, 0.0);
        assert!(max >= 1335.0);
        assert!((step - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_range_all_zero() {
        let (min, max, _) = axis_range([0.0, 0.0].into_iter());
        assert_eq!(min, 0.0);
        assert!(max > 0.0);
    }

    #[test]
    fn test_axis_range_negative_values() {
        let (min, max, _) = axis_range([-20.0, 50.0].into_iter());
        assert!(min <= -20.0);
        assert!(max >= 50.0);
    }

    #[test]
    fn test_render_geometry() {
        let t = table([
            (dec!(1235), dec!(1335)),
            (dec!(988), dec!(988)),
            (dec!(45.67), dec!(55.67)),
        ]);
        let chart = render_chart(&t, &ReportOptions::default()).unwrap();
        assert_eq!(chart.width(), 800);
        assert_eq!(chart.height(), 500);
        assert_eq!(chart.group_centers.len(), 3);
        assert!(chart.group_centers.windows(2).all(|w| w[0] < w[1]));
        assert!(!chart.ticks.is_empty());
        assert_eq!(chart.rgb().len(), 800 * 500 * 3);
        assert!(chart.png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_bars_use_series_colors() {
        let t = table([
            (dec!(1000), dec!(1000)),
            (dec!(1000), dec!(1000)),
            (dec!(1000), dec!(1000)),
        ]);
        let chart = render_chart(&t, &ReportOptions::default()).unwrap();
        let center = chart.group_centers[0];
        let bar_width = chart.plot.width / 3.0 * BAR_WIDTH;
        // Just above the baseline, inside each bar.
        let y = chart.plot.y + chart.plot.height - 10.0;
        assert_eq!(pixel(&chart, center - bar_width / 2.0, y), [0, 0, 255]);
        assert_eq!(pixel(&chart, center + bar_width / 2.0, y), [255, 0, 0]);
    }
}
