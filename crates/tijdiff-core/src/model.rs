use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three totals read from a report's Final Total line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Tij,
    Yksb1,
    Yksb2,
}

impl Metric {
    /// Fixed presentation order used by every table, chart and report.
    pub const ALL: [Metric; 3] = [Metric::Tij, Metric::Yksb1, Metric::Yksb2];

    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::Tij => "Tij",
            Metric::Yksb1 => "Yksb 1",
            Metric::Yksb2 => "Yksb 2",
        }
    }

    /// Whether the metric is reported in thousands (rounded to whole units).
    pub fn is_scaled(&self) -> bool {
        matches!(self, Metric::Tij | Metric::Yksb1)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Totals parsed from one document. Either all three values exist or the
/// record is not produced at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsRecord {
    pub tij: Decimal,
    pub yksb1: Decimal,
    pub yksb2: Decimal,
}

impl TotalsRecord {
    pub fn get(&self, metric: Metric) -> Decimal {
        match metric {
            Metric::Tij => self.tij,
            Metric::Yksb1 => self.yksb1,
            Metric::Yksb2 => self.yksb2,
        }
    }
}

/// Short period identifier such as `Tij112405`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodLabel(String);

impl PeriodLabel {
    pub const UNKNOWN: &'static str = "TijUnknown";

    pub fn new(label: impl Into<String>) -> Self {
        PeriodLabel(label.into())
    }

    pub fn unknown() -> Self {
        PeriodLabel(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the extraction stage learned about a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentData {
    pub label: PeriodLabel,
    pub totals: Option<TotalsRecord>,
}
