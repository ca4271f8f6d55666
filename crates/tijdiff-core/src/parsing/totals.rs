use crate::model::TotalsRecord;
use crate::parsing::values::parse_grouped_decimal;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Literal text that anchors the totals line.
pub const FINAL_TOTAL_MARKER: &str = "*** Final Total ***";

/// Marker followed by eight numeric tokens. The first four are structural
/// counters and are not captured; the last four are captured as g1..g4.
static FINAL_TOTAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let num = r"[0-9.,]+";
    let pattern = format!(
        r"{marker}\s+{num}\s+{num}\s+{num}\s+{num}\s+({num})\s+({num})\s+({num})\s+({num})",
        marker = regex::escape(FINAL_TOTAL_MARKER),
    );
    Regex::new(&pattern).expect("Final Total pattern is valid")
});

/// Find the Final Total line in extracted text and read the totals from it.
///
/// Capture-to-metric mapping of the four captured tokens:
/// - g1: not used
/// - g2: Tij
/// - g3: Yksb 2
/// - g4: Yksb 1
///
/// Yksb 2 sits before Yksb 1 on the line. Only the first matching occurrence
/// in the text is read. Returns None when the marker is missing, when fewer
/// than eight numeric tokens follow it, or when a captured token is not a
/// number; a partial record is never produced.
pub fn parse_totals(text: &str) -> Option<TotalsRecord> {
    let Some(caps) = FINAL_TOTAL_RE.captures(text) else {
        debug!("no Final Total line found");
        return None;
    };

    let field = |group: usize| {
        let token = caps.get(group)?.as_str();
        let value = parse_grouped_decimal(token);
        if value.is_none() {
            warn!(token, group, "Final Total token is not a number");
        }
        value
    };

    let tij = field(2)?;
    let yksb2 = field(3)?;
    let yksb1 = field(4)?;

    debug!(%tij, %yksb1, %yksb2, "parsed Final Total line");
    Some(TotalsRecord { tij, yksb1, yksb2 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_maps_captures_to_metrics() {
        let text = "*** Final Total *** 1 2 3 4 999 100 200 300";
        let totals = parse_totals(text).unwrap();
        assert_eq!(totals.tij, dec!(100));
        assert_eq!(totals.yksb2, dec!(200));
        assert_eq!(totals.yksb1, dec!(300));
    }

    #[test]
    fn test_ignores_first_capture() {
        let a = parse_totals("*** Final Total *** 1 2 3 4 5 10 20 30").unwrap();
        let b = parse_totals("*** Final Total *** 1 2 3 4 98,765 10 20 30").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_thousands_separators() {
        let text = "*** Final Total ***  12  1,024  7  3  55,000.00  1,234,567.89  45.67  987,654.32";
        let totals = parse_totals(text).unwrap();
        assert_eq!(totals.tij, dec!(1234567.89));
        assert_eq!(totals.yksb1, dec!(987654.32));
        assert_eq!(totals.yksb2, dec!(45.67));
    }

    #[test]
    fn test_tokens_spread_over_lines() {
        let text = "Report body\n*** Final Total ***\n1\n2\n3\n4\n5\n6.5\n7.25\n8\nFooter";
        let totals = parse_totals(text).unwrap();
        assert_eq!(totals.tij, dec!(6.5));
        assert_eq!(totals.yksb2, dec!(7.25));
        assert_eq!(totals.yksb1, dec!(8));
    }

    #[test]
    fn test_marker_missing() {
        assert!(parse_totals("Final Total 1 2 3 4 5 6 7 8").is_none());
        assert!(parse_totals("").is_none());
    }

    #[test]
    fn test_too_few_tokens() {
        assert!(parse_totals("*** Final Total *** 1 2 3 4 5 6 7").is_none());
        assert!(parse_totals("*** Final Total *** 1 2 3 4 5 6 7 end").is_none());
    }

    #[test]
    fn test_non_numeric_token_breaks_sequence() {
        assert!(parse_totals("*** Final Total *** 1 2 3 4 5 6 n/a 8").is_none());
    }

    #[test]
    fn test_separator_only_token_is_not_found() {
        assert!(parse_totals("*** Final Total *** 1 2 3 4 5 , 7 8").is_none());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "*** Final Total *** 1 2 3 4 5 10 20 30\n\
                    *** Final Total *** 1 2 3 4 5 11 21 31";
        let totals = parse_totals(text).unwrap();
        assert_eq!(totals.tij, dec!(10));
    }

    #[test]
    fn test_extra_tokens_after_eighth_are_ignored() {
        let text = "*** Final Total *** 1 2 3 4 5 10 20 30 40 50";
        let totals = parse_totals(text).unwrap();
        assert_eq!(totals.yksb1, dec!(30));
    }
}
