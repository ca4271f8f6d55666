pub mod compare;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod report;

use compare::ComparisonTable;
use config::ReportOptions;
use error::TijError;
use extraction::{extract_text, DocumentSource, PdfExtractor};
use model::DocumentData;
use parsing::date::extract_date_label;
use parsing::totals::parse_totals;
use report::chart::ChartImage;
use report::ReportArtifact;
use tracing::{info, warn};

/// Everything a comparison run produces.
pub struct ComparisonOutcome {
    pub first: DocumentData,
    pub second: DocumentData,
    pub table: ComparisonTable,
    pub chart: ChartImage,
    pub report: ReportArtifact,
}

/// Read the period label and the Final Totals of one document.
///
/// The source is read twice, once for the date scan and once for the text
/// the totals are parsed from; each read sees the full document.
pub fn analyze_document(
    source: &dyn DocumentSource,
    extractor: &dyn PdfExtractor,
) -> Result<DocumentData, TijError> {
    let name = source.name();
    info!(document = %name, backend = extractor.backend_name(), "analyzing document");

    let pages = extractor.extract_pages(&source.read_all()?)?;
    let label = extract_date_label(&pages);

    let pages = extractor.extract_pages(&source.read_all()?)?;
    let text = extract_text(&pages);
    let totals = parse_totals(&text);
    if totals.is_none() {
        warn!(document = %name, "no Final Total line found");
    }

    Ok(DocumentData { label, totals })
}

/// Main API entry point: compare the Final Totals of two documents.
///
/// Fails with `TotalsNotFound` before building any table, chart or report
/// if either document lacks a Final Total line.
pub fn compare_documents(
    first: &dyn DocumentSource,
    second: &dyn DocumentSource,
    extractor: &dyn PdfExtractor,
    options: &ReportOptions,
) -> Result<ComparisonOutcome, TijError> {
    let first_data = analyze_document(first, extractor)?;
    let second_data = analyze_document(second, extractor)?;

    let (totals1, totals2) = match (first_data.totals, second_data.totals) {
        (Some(a), Some(b)) => (a, b),
        (a, b) => {
            let mut documents = Vec::new();
            if a.is_none() {
                documents.push(first.name());
            }
            if b.is_none() {
                documents.push(second.name());
            }
            return Err(TijError::TotalsNotFound { documents });
        }
    };

    let table = compare::build_comparison(
        &totals1,
        &totals2,
        first_data.label.clone(),
        second_data.label.clone(),
    );
    info!(label1 = %table.label1, label2 = %table.label2, "built comparison");

    let chart = report::chart::render_chart(&table, options)?;
    let report = report::compose_report(&table, &chart)?;

    Ok(ComparisonOutcome {
        first: first_data,
        second: second_data,
        table,
        chart,
        report,
    })
}
