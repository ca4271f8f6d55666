use crate::extraction::PageContent;
use crate::model::PeriodLabel;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// DD/MM/YYYY as a whole word. The shape alone decides; the date is not
/// checked against a calendar.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9]{2})/([0-9]{2})/([0-9]{4})\b").expect("date pattern is valid")
});

/// Derive the period label from the first DD/MM/YYYY date in the document.
///
/// Pages are scanned in ascending order and the first match on the first
/// matching page wins. The label is `Tij` + month + two-digit year + day, so
/// `05/11/2024` becomes `Tij112405`. Documents without a date get
/// `TijUnknown`.
pub fn extract_date_label(pages: &[PageContent]) -> PeriodLabel {
    let mut ordered: Vec<&PageContent> = pages.iter().collect();
    ordered.sort_by_key(|p| p.page_number);

    for page in ordered {
        if let Some(label) = label_from_text(&page.text) {
            debug!(page = page.page_number, %label, "derived period label");
            return label;
        }
    }

    warn!("no DD/MM/YYYY date found, using {}", PeriodLabel::UNKNOWN);
    PeriodLabel::unknown()
}

/// Build a label from the first date in a single piece of text.
pub fn label_from_text(text: &str) -> Option<PeriodLabel> {
    let caps = DATE_RE.captures(text)?;
    let day = caps.get(1)?.as_str();
    let month = caps.get(2)?.as_str();
    let year = caps.get(3)?.as_str();
    Some(PeriodLabel::new(format!("Tij{}{}{}", month, &year[2..], day)))
}
