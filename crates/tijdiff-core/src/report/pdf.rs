use crate::compare::ComparisonTable;
use crate::error::TijError;
use crate::report::chart::ChartImage;
use crate::report::format::format_cell;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use std::io::Write;

// A4 in points.
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 72.0;

const COLUMN_WIDTHS: [f32; 4] = [80.0, 120.0, 120.0, 120.0];
const HEADER_HEIGHT: f32 = 24.0;
const ROW_HEIGHT: f32 = 20.0;
const CELL_PADDING: f32 = 6.0;
const SPACER: f32 = 20.0;

const IMAGE_WIDTH: f32 = 400.0;
const IMAGE_HEIGHT: f32 = 250.0;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

/// Lay out the comparison table, the chart and the summary on one A4 page.
pub fn render_pdf(
    table: &ComparisonTable,
    chart: &ChartImage,
    summary: &[String],
) -> Result<Vec<u8>, TijError> {
    let mut page = PageWriter::default();

    let mut y = PAGE_HEIGHT - MARGIN;
    y = draw_table(&mut page, table, MARGIN, y);
    y -= SPACER;

    let image_x = (PAGE_WIDTH - IMAGE_WIDTH) / 2.0;
    let image_bottom = y - IMAGE_HEIGHT;
    page.image("Im1", image_x, image_bottom, IMAGE_WIDTH, IMAGE_HEIGHT);
    annotate_chart(&mut page, table, chart, image_x, y);
    y = image_bottom - SPACER;

    y -= 14.0;
    page.text(BOLD, 12.0, MARGIN, y, "Automated Summary:");
    for line in summary {
        y -= 14.0;
        page.text(REGULAR, 10.0, MARGIN, y, &pdf_text(line));
    }

    build_document(page.ops, chart)
}

/// Draw the table with its top-left corner at (x, top). Returns the y of the
/// table's bottom edge.
fn draw_table(page: &mut PageWriter, table: &ComparisonTable, x: f32, top: f32) -> f32 {
    let total_width: f32 = COLUMN_WIDTHS.iter().sum();
    let body_rows = table.rows.len() as f32;
    let bottom = top - HEADER_HEIGHT - ROW_HEIGHT * body_rows;

    page.fill_rect([0.827, 0.827, 0.827], x, top - HEADER_HEIGHT, total_width, HEADER_HEIGHT);

    let header = ["", table.label1.as_str(), table.label2.as_str(), "Ikh"];
    let mut cx = x;
    for (text, width) in header.iter().zip(COLUMN_WIDTHS) {
        // Header padding is 6pt top, 8pt bottom.
        page.text(BOLD, 10.0, cx + CELL_PADDING, top - HEADER_HEIGHT + 8.0, text);
        cx += width;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let row_bottom = top - HEADER_HEIGHT - ROW_HEIGHT * (i as f32 + 1.0);
        let baseline = row_bottom + 6.0;
        let cells = [
            row.metric.display_name().to_string(),
            format_cell(row.metric, row.value1),
            format_cell(row.metric, row.value2),
            format_cell(row.metric, row.delta),
        ];

        let mut cx = x;
        for (col, (text, width)) in cells.iter().zip(COLUMN_WIDTHS).enumerate() {
            if col == 0 {
                page.text(REGULAR, 10.0, cx + CELL_PADDING, baseline, text);
            } else {
                let tw = text_width(text, 10.0);
                page.text(REGULAR, 10.0, cx + width - CELL_PADDING - tw, baseline, text);
            }
            cx += width;
        }
    }

    // Grid
    page.stroke_color([0.5, 0.5, 0.5], 0.5);
    let mut gy = top;
    page.line(x, gy, x + total_width, gy);
    gy -= HEADER_HEIGHT;
    for _ in 0..=table.rows.len() {
        page.line(x, gy, x + total_width, gy);
        gy -= ROW_HEIGHT;
    }
    let mut gx = x;
    page.line(gx, top, gx, bottom);
    for width in COLUMN_WIDTHS {
        gx += width;
        page.line(gx, top, gx, bottom);
    }

    bottom
}

/// Place the chart's title, axis labels and legend over the embedded image
/// whose top-left corner is at (left, top).
fn annotate_chart(page: &mut PageWriter, table: &ComparisonTable, chart: &ChartImage, left: f32, top: f32) {
    let sx = IMAGE_WIDTH / chart.width() as f32;
    let sy = IMAGE_HEIGHT / chart.height() as f32;
    let px = |x: f32| left + x * sx;
    let py = |y: f32| top - y * sy;
    let plot = chart.plot;

    let title = format!("{} vs {}", table.label1, table.label2);
    let title_x = px(plot.x + plot.width / 2.0) - text_width(&title, 11.0) / 2.0;
    page.text(BOLD, 11.0, title_x, py(plot.y / 2.0) - 4.0, &title);

    let below_plot = py(plot.y + plot.height) - 12.0;
    for (row, &center) in table.rows.iter().zip(&chart.group_centers) {
        let name = row.metric.display_name();
        page.text(REGULAR, 9.0, px(center) - text_width(name, 9.0) / 2.0, below_plot, name);
    }

    for tick in &chart.ticks {
        let label = format_tick(tick.value);
        let tx = px(plot.x) - 3.0 - text_width(&label, 7.0);
        page.text(REGULAR, 7.0, tx, py(tick.y) - 2.5, &label);
    }

    page.rotated_text(REGULAR, 8.0, left + 10.0, py(plot.y + plot.height * 0.85), "Values (in thousands)");

    // Legend in the plot's top-right corner.
    let legend_x = px(plot.x + plot.width) - 70.0;
    let mut legend_y = py(plot.y) - 12.0;
    for (label, color) in [&table.label1, &table.label2].iter().zip(chart.colors) {
        let rgb = color.map(|c| c as f32 / 255.0);
        page.fill_rect(rgb, legend_x, legend_y, 8.0, 8.0);
        page.text(REGULAR, 8.0, legend_x + 11.0, legend_y + 1.0, label.as_str());
        legend_y -= 11.0;
    }
}

fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn build_document(ops: Vec<Operation>, chart: &ChartImage) -> Result<Vec<u8>, TijError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&chart.rgb())?;
    let image_data = encoder.finish()?;
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(i64::from(chart.width())),
            "Height" => Object::Integer(i64::from(chart.height())),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => Object::Integer(8),
            "Filter" => "FlateDecode",
        },
        image_data,
    ));

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR => regular_id,
            BOLD => bold_id,
        },
        "XObject" => dictionary! {
            "Im1" => image_id,
        },
    });

    let content = Content { operations: ops }
        .encode()
        .map_err(|e| TijError::Render(format!("content stream: {}", e)))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => Object::Integer(1),
        "Resources" => resources_id,
        "MediaBox" => vec![real(0.0), real(0.0), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| TijError::Render(format!("writing PDF: {}", e)))?;
    Ok(out)
}

fn real(v: f32) -> Object {
    Object::Real(v)
}

/// Accumulates content-stream operators for a single page.
#[derive(Default)]
struct PageWriter {
    ops: Vec<Operation>,
}

impl PageWriter {
    fn text(&mut self, font: &str, size: f32, x: f32, y: f32, text: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new("Tf", vec![font.into(), real(size)]));
        self.ops.push(Operation::new("Td", vec![real(x), real(y)]));
        self.ops.push(Operation::new("Tj", vec![encode_text(text)]));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Text running bottom to top, starting at (x, y).
    fn rotated_text(&mut self, font: &str, size: f32, x: f32, y: f32, text: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new("Tf", vec![font.into(), real(size)]));
        self.ops.push(Operation::new(
            "Tm",
            vec![real(0.0), real(1.0), real(-1.0), real(0.0), real(x), real(y)],
        ));
        self.ops.push(Operation::new("Tj", vec![encode_text(text)]));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn fill_rect(&mut self, rgb: [f32; 3], x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new("rg", rgb.iter().map(|&c| real(c)).collect()));
        self.ops.push(Operation::new("re", vec![real(x), real(y), real(w), real(h)]));
        self.ops.push(Operation::new("f", vec![]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    fn stroke_color(&mut self, rgb: [f32; 3], width: f32) {
        self.ops.push(Operation::new("RG", rgb.iter().map(|&c| real(c)).collect()));
        self.ops.push(Operation::new("w", vec![real(width)]));
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.ops.push(Operation::new("m", vec![real(x1), real(y1)]));
        self.ops.push(Operation::new("l", vec![real(x2), real(y2)]));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn image(&mut self, name: &str, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "cm",
            vec![real(w), real(0.0), real(0.0), real(h), real(x), real(y)],
        ));
        self.ops.push(Operation::new("Do", vec![name.into()]));
        self.ops.push(Operation::new("Q", vec![]));
    }
}

/// Text as the standard fonts can show it.
///
/// The summary arrows have no WinAnsi glyph; they become `+` and `-`. Other
/// characters outside Latin-1 are dropped.
pub fn pdf_text(text: &str) -> String {
    let replaced = text.replace('🔼', "+").replace('🔽', "-");
    replaced
        .chars()
        .filter(|&c| (c as u32) <= 0xFF)
        .collect::<String>()
        .trim()
        .to_string()
}

fn encode_text(text: &str) -> Object {
    let bytes: Vec<u8> = text
        .chars()
        .filter_map(|c| u8::try_from(c as u32).ok())
        .collect();
    Object::String(bytes, StringFormat::Literal)
}

/// Approximate advance width using Helvetica's metrics (the bold face is
/// close enough for centering and right alignment).
fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(glyph_width).sum();
    units as f32 * size / 1000.0
}

fn glyph_width(c: char) -> u32 {
    match c {
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | '[' | '\\' | ']' | 'I' | 'f' | 't' => 278,
        '0'..='9' | '#' | '$' | '?' | '_' => 556,
        '-' | '(' | ')' | '`' | 'r' => 333,
        'i' | 'j' | 'l' => 222,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' | 'J' => 500,
        'm' | 'M' => 833,
        'w' | 'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 722,
        'F' | 'T' | 'Z' => 611,
        'G' | 'O' | 'Q' => 778,
        'L' => 556,
        'W' => 944,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        '+' | '<' | '=' | '>' | '~' => 584,
        _ => 556,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_text_replaces_arrows() {
        assert_eq!(pdf_text("🔼 Tij increased."), "+ Tij increased.");
        assert_eq!(pdf_text("🔽 Tij decreased."), "- Tij decreased.");
        assert_eq!(
            pdf_text("No significant changes detected."),
            "No significant changes detected."
        );
    }

    #[test]
    fn test_pdf_text_drops_non_latin1() {
        assert_eq!(pdf_text("📊 Chart"), "Chart");
        assert_eq!(pdf_text("Växjö"), "Växjö");
    }

    #[test]
    fn test_encode_text_latin1_bytes() {
        match encode_text("ä1") {
            Object::String(bytes, _) => assert_eq!(bytes, vec![0xE4, b'1']),
            other => panic!("unexpected object {other:?}"),
        }
    }

    #[test]
    fn test_text_width_digits() {
        assert!((text_width("1,235", 10.0) - 25.02).abs() < 1e-3);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(500.0), "500");
        assert_eq!(format_tick(0.5), "0.50");
    }
}
