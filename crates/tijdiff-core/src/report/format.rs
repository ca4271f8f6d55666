use crate::model::Metric;
use rust_decimal::Decimal;

/// Format a table cell the way the report shows it: whole units for the
/// scaled metrics, two decimals for Yksb 2, both with comma grouping.
pub fn format_cell(metric: Metric, value: Decimal) -> String {
    if metric.is_scaled() {
        format_grouped(value, 0)
    } else {
        format_grouped(value, 2)
    }
}

/// Round to `decimals` places and group the integer part by thousands.
pub fn format_grouped(value: Decimal, decimals: u32) -> String {
    let mut rounded = value.round_dp(decimals);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    let negative = rounded.is_sign_negative();
    let plain = format!("{:.*}", decimals as usize, rounded.abs());

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
