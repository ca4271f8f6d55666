use tijdiff_core::compare::ComparisonTable;
use tijdiff_core::model::{DocumentData, Metric};
use tijdiff_core::report::format::format_cell;
use tijdiff_core::report::ReportArtifact;

pub fn print(table: &ComparisonTable, report: &ReportArtifact) {
    println!("=== Tij/Yksb Comparison: {} vs {} ===\n", table.label1, table.label2);
    println!("{}", format_table(table));
    println!("  Automated Summary:");
    for line in &report.summary {
        println!("    {line}");
    }
}

/// Render the comparison as an aligned text table.
pub fn format_table(table: &ComparisonTable) -> String {
    let header = [
        "Metric".to_string(),
        table.label1.to_string(),
        table.label2.to_string(),
        "Ikh".to_string(),
    ];
    let rows: Vec<[String; 4]> = table
        .rows
        .iter()
        .map(|r| {
            [
                r.metric.display_name().to_string(),
                format_cell(r.metric, r.value1),
                format_cell(r.metric, r.value2),
                format_cell(r.metric, r.delta),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "  {:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}\n",
        header[0],
        header[1],
        header[2],
        header[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3]
    ));
    for row in &rows {
        out.push_str(&format!(
            "  {:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}\n",
            row[0],
            row[1],
            row[2],
            row[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3]
        ));
    }
    out
}

pub fn format_document(data: &DocumentData) -> String {
    let mut out = format!("  Period label: {}\n", data.label);
    match &data.totals {
        Some(totals) => {
            for metric in Metric::ALL {
                out.push_str(&format!("  {:<7} {}\n", metric.display_name(), totals.get(metric)));
            }
        }
        None => out.push_str("  Final Total line not found\n"),
    }
    out
}
