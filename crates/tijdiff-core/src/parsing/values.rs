use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a numeric token from a Final Total line into a Decimal.
///
/// Handles formats like:
/// - "68" -> 68
/// - "45.67" -> 45.67
/// - "1,234,567.89" -> 1234567.89 (comma is always a thousands separator)
///
/// Returns None for tokens that are not numbers once the separators are
/// removed (e.g. "," or "1.2.3"). Magnitudes beyond `Decimal::MAX`
/// (about 7.9e28, 29 integer digits) also return None, so a totals line
/// carrying such a value counts as not found.
pub fn parse_grouped_decimal(s: &str) -> Option<Decimal> {
    let stripped: String = s.trim().chars().filter(|&c| c != ',').collect();
    if stripped.is_empty() {
        return None;
    }
    Decimal::from_str(&stripped).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_integer() {
        assert_eq!(parse_grouped_decimal("68"), Some(dec!(68)));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(parse_grouped_decimal("45.67"), Some(dec!(45.67)));
    }

    #[test]
    fn test_thousands_separators_stripped() {
        assert_eq!(
            parse_grouped_decimal("1,234,567.89"),
            Some(dec!(1234567.89))
        );
    }

    #[test]
    fn test_comma_is_never_decimal() {
        // "0,030" is 30 with a misplaced grouping comma, not 0.030.
        assert_eq!(parse_grouped_decimal("0,030"), Some(dec!(30)));
    }

    #[test]
    fn test_whitespace_trimming() {
        assert_eq!(parse_grouped_decimal("  12.5 "), Some(dec!(12.5)));
    }

    #[test]
    fn test_separator_only_is_none() {
        assert!(parse_grouped_decimal(",").is_none());
        assert!(parse_grouped_decimal(",,,").is_none());
    }

    #[test]
    fn test_multiple_dots_is_none() {
        assert!(parse_grouped_decimal("1.2.3").is_none());
    }

    #[test]
    fn test_empty_is_none() {
        assert!(parse_grouped_decimal("").is_none());
    }

    #[test]
    fn test_beyond_decimal_range_is_none() {
        assert!(parse_grouped_decimal("100,000,000,000,000,000,000,000,000,000").is_none());
        assert!(parse_grouped_decimal("79,228,162,514,264,337,593,543,950,335").is_some());
    }
}
