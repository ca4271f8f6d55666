use crate::compare::ComparisonTable;
use crate::model::Metric;
use rust_decimal::Decimal;

pub const NO_CHANGES: &str = "No significant changes detected.";

/// Narrative lines derived from the signs of the table's deltas.
///
/// Tij reports increases and decreases; Yksb 1 and Yksb 2 only report
/// increases. Zero deltas say nothing. When no line applies the summary is
/// the single `NO_CHANGES` line.
pub fn summarize(table: &ComparisonTable) -> Vec<String> {
    let mut lines = Vec::new();

    let tij = table.delta(Metric::Tij);
    if tij > Decimal::ZERO {
        lines.push("🔼 Tij increased.".to_string());
    } else if tij < Decimal::ZERO {
        lines.push("🔽 Tij decreased.".to_string());
    }

    if table.delta(Metric::Yksb1) > Decimal::ZERO {
        lines.push("🔼 Yksb 1 increased.".to_string());
    }

    if table.delta(Metric::Yksb2) > Decimal::ZERO {
        lines.push("🔼 Yksb 2 increased.".to_string());
    }

    if lines.is_empty() {
        lines.push(NO_CHANGES.to_string());
    }

    lines
}
