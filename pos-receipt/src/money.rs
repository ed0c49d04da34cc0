//! Currency formatting for receipt rows

use rust_decimal::prelude::*;

/// Currency precision printed on receipts
pub const DECIMAL_PLACES: u32 = 2;

/// Round to cents, midpoint away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with two decimals
///
/// With `grouping`, thousands are separated by commas (`12,345.60`).
/// Negative amounts keep their sign.
pub fn format_money(value: Decimal, grouping: bool) -> String {
    let rounded = round_money(value);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let int_part = if grouping {
        group_thousands(int_part)
    } else {
        int_part.to_string()
    };

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, int_part, frac_part)
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

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_two_decimals() {
        assert_eq!(format_money(dec("1000"), false), "1000.00");
        assert_eq!(format_money(dec("192"), false), "192.00");
        assert_eq!(format_money(dec("0.5"), false), "0.50");
        assert_eq!(format_money(Decimal::ZERO, true), "0.00");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_money(dec("1392"), true), "1,392.00");
        assert_eq!(format_money(dec("999.99"), true), "999.99");
        assert_eq!(format_money(dec("1234567.891"), true), "1,234,567.89");
        assert_eq!(format_money(dec("100000"), true), "100,000.00");
    }

    #[test]
    fn test_rounding_midpoint_away_from_zero() {
        assert_eq!(format_money(dec("2.345"), false), "2.35");
        assert_eq!(format_money(dec("-2.345"), false), "-2.35");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_money(dec("-1500"), true), "-1,500.00");
        assert_eq!(format_money(dec("-0.001"), false), "0.00");
    }
}
