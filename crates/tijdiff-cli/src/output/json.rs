use serde_json::json;
use tijdiff_core::compare::ComparisonTable;
use tijdiff_core::error::TijError;
use tijdiff_core::model::DocumentData;
use tijdiff_core::report::ReportArtifact;

pub fn print(data: &DocumentData) -> Result<(), TijError> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{json}");
    Ok(())
}

pub fn print_comparison(table: &ComparisonTable, report: &ReportArtifact) -> Result<(), TijError> {
    let value = json!({
        "table": table,
        "report": report,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
