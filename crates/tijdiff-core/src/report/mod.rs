pub mod chart;
pub mod format;
pub mod pdf;
pub mod summary;

use crate::compare::ComparisonTable;
use crate::error::TijError;
use chart::ChartImage;
use serde::Serialize;
use tracing::info;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// The downloadable comparison report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportArtifact {
    /// `{label1}_{label2}_Report.pdf`
    pub file_name: String,
    pub mime_type: &'static str,
    pub summary: Vec<String>,
    #[serde(skip)]
    pub pdf: Vec<u8>,
}

/// File name of the report for a pair of period labels.
pub fn report_file_name(table: &ComparisonTable) -> String {
    format!("{}_{}_Report.pdf", table.label1, table.label2)
}

/// Compose the report: table, then chart, then the automated summary.
pub fn compose_report(table: &ComparisonTable, chart: &ChartImage) -> Result<ReportArtifact, TijError> {
    let summary = summary::summarize(table);
    let pdf = pdf::render_pdf(table, chart, &summary)?;
    let file_name = report_file_name(table);
    info!(file = %file_name, bytes = pdf.len(), "composed report");

    Ok(ReportArtifact {
        file_name,
        mime_type: PDF_MIME_TYPE,
        summary,
        pdf,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::build_comparison;
    use crate::config::ReportOptions;
    use crate::model::{PeriodLabel, TotalsRecord};
    use lopdf::Document;
    use rust_decimal_macros::dec;

    fn reference_table() -> ComparisonTable {
        let a = TotalsRecord {
            tij: dec!(1234567.89),
            yksb1: dec!(987654.32),
            yksb2: dec!(45.67),
        };
        let b = TotalsRecord {
            tij: dec!(1334567.89),
            yksb1: dec!(987654.32),
            yksb2: dec!(55.67),
        };
        build_comparison(
            &a,
            &b,
            PeriodLabel::new("Tij092430"),
            PeriodLabel::new("Tij102431"),
        )
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name(&reference_table()), "Tij092430_Tij102431_Report.pdf");
    }

    #[test]
    fn test_compose_report_produces_loadable_pdf() {
        let table = reference_table();
        let chart = chart::render_chart(&table, &ReportOptions::default()).unwrap();
        let artifact = compose_report(&table, &chart).unwrap();

        assert_eq!(artifact.mime_type, "application/pdf");
        assert_eq!(artifact.summary, vec!["🔼 Tij increased.", "🔼 Yksb 2 increased."]);
        assert!(artifact.pdf.starts_with(b"%PDF-"));

        let doc = Document::load_mem(&artifact.pdf).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);

        let page_id = *pages.values().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        let content = String::from_utf8_lossy(&content);
        assert!(content.contains("(Automated Summary:) Tj"));
        assert!(content.contains("(1,235) Tj"));
        assert!(content.contains("(10.00) Tj"));
        assert!(content.contains("(Ikh) Tj"));
        assert!(content.contains("/Im1 Do"));
    }
}
