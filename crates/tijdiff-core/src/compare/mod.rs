use crate::model::{Metric, PeriodLabel, TotalsRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tij and Yksb 1 are reported in thousands.
pub const THOUSANDS: Decimal = Decimal::ONE_THOUSAND;

/// One metric of the comparison, in presentation units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: Metric,
    pub value1: Decimal,
    pub value2: Decimal,
    /// Second period minus first period ("Ikh").
    pub delta: Decimal,
}

/// Period-over-period comparison of two documents.
///
/// Rows are always Tij, Yksb 1, Yksb 2 in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub label1: PeriodLabel,
    pub label2: PeriodLabel,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn row(&self, metric: Metric) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.metric == metric)
    }

    pub fn delta(&self, metric: Metric) -> Decimal {
        self.row(metric).map(|r| r.delta).unwrap_or_default()
    }
}

/// Compare two totals records.
///
/// Deltas are taken on the raw values. Tij and Yksb 1 are then divided by
/// a thousand and rounded to whole units, each column independently; Yksb 2
/// keeps its values and has its delta rounded to two decimals. Rounding is
/// rust_decimal's default, half-to-even.
pub fn build_comparison(
    first: &TotalsRecord,
    second: &TotalsRecord,
    label1: PeriodLabel,
    label2: PeriodLabel,
) -> ComparisonTable {
    let rows = Metric::ALL
        .iter()
        .map(|&metric| {
            let raw1 = first.get(metric);
            let raw2 = second.get(metric);
            let raw_delta = raw2 - raw1;

            let row = if metric.is_scaled() {
                ComparisonRow {
                    metric,
                    value1: scale(raw1),
                    value2: scale(raw2),
                    delta: scale(raw_delta),
                }
            } else {
                ComparisonRow {
                    metric,
                    value1: raw1,
                    value2: raw2,
                    delta: clear_negative_zero(raw_delta.round_dp(2)),
                }
            };
            debug!(%metric, value1 = %row.value1, value2 = %row.value2, delta = %row.delta, "compared metric");
            row
        })
        .collect();

    ComparisonTable {
        label1,
        label2,
        rows,
    }
}

/// Divide by a thousand and round to the nearest integer (ties to even).
pub fn scale(value: Decimal) -> Decimal {
    clear_negative_zero((value / THOUSANDS).round())
}

/// Rounding -0.4 yields a zero with the sign bit set; present it as 0.
fn clear_negative_zero(value: Decimal) -> Decimal {
    if value.is_zero() {
        Decimal::ZERO
    } else {
        value
    }
}
