//! Minor-unit currency helpers.
//!
//! # Invariants
//! - Accepted amounts never exceed [`MAX_AMOUNT_CENTS`].
//! - Totals never wrap; an overflowing sum is reported as `None`.

/// Largest single gift accepted: $1,000,000,000.00.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000;

/// Formats integer cents as dollars with two fixed decimals, e.g. `$25.50`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!("{sign}${}.{:02}", magnitude / 100, magnitude % 100)
}

/// Parses a user-entered decimal amount into cents, rounding half away from
/// zero.
///
/// Returns `None` for non-numeric, non-finite, non-positive or over-cap
/// input; blank input counts as zero and is rejected.
pub fn parse_amount_to_cents(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = trimmed.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    let cents = (value * 100.0).round();
    if cents <= 0.0 || cents > MAX_AMOUNT_CENTS as f64 {
        return None;
    }
    Some(cents as i64)
}

/// Sums cent amounts; `None` when the total does not fit in `i64`.
pub fn total_cents(amounts: impl IntoIterator<Item = i64>) -> Option<i64> {
    amounts
        .into_iter()
        .try_fold(0i64, |total, amount| total.checked_add(amount))
}

#[cfg(test)]
mod tests {
    use super::{format_cents, parse_amount_to_cents, total_cents, MAX_AMOUNT_CENTS};

    #[test]
    fn format_uses_two_fixed_decimals() {
        assert_eq!(format_cents(2550), "$25.50");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(-120), "-$1.20");
    }

    #[test]
    fn parse_converts_decimal_input_to_cents() {
        assert_eq!(parse_amount_to_cents("25.50"), Some(2550));
        assert_eq!(parse_amount_to_cents(" 10 "), Some(1000));
        assert_eq!(parse_amount_to_cents("0.29"), Some(29));
    }

    #[test]
    fn parse_rejects_blank_non_numeric_and_non_positive() {
        assert_eq!(parse_amount_to_cents(""), None);
        assert_eq!(parse_amount_to_cents("abc"), None);
        assert_eq!(parse_amount_to_cents("0"), None);
        assert_eq!(parse_amount_to_cents("-5"), None);
        assert_eq!(parse_amount_to_cents("0.001"), None);
        assert_eq!(parse_amount_to_cents("inf"), None);
    }

    #[test]
    fn parse_rejects_amounts_above_cap() {
        assert_eq!(parse_amount_to_cents("1000000000"), Some(MAX_AMOUNT_CENTS));
        assert_eq!(parse_amount_to_cents("1000000000.01"), None);
        assert_eq!(parse_amount_to_cents("60000000000000000"), None);
    }

    #[test]
    fn total_reports_overflow_instead_of_wrapping() {
        assert_eq!(total_cents([2550, 450]), Some(3000));
        assert_eq!(total_cents([]), Some(0));
        assert_eq!(total_cents([i64::MAX, 1]), None);
    }
}
