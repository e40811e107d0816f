//! # Amount Formatting
//!
//! Renders amounts the way Nigerian English (`en-NG`) displays numbers:
//! comma thousands separators, a dot for decimals, at most three fraction
//! digits and no trailing zeros. Ties round away from zero, applied to the
//! shortest decimal form of the value.
//!
//! ```text
//! 1234        → "1,234"
//! 1234.5      → "1,234.5"
//! 0.12345     → "0.123"
//! 0.0625      → "0.063"
//! -1500       → "-1,500"
//! NaN, ±∞     → "0"
//! ```

/// Maximum fraction digits shown, matching the locale default.
const MAX_FRACTION_DIGITS: usize = 3;

/// Formats an amount with en-NG grouping.
///
/// Non-finite input renders as `"0"`, which is what a row with an
/// unparseable quantity shows.
///
/// ## Example
/// ```rust
/// use cardcalc_core::format::format_amount;
///
/// assert_eq!(format_amount(1234.0), "1,234");
/// assert_eq!(format_amount(f64::NAN), "0");
/// ```
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let (int_part, frac_part) = round_half_up(value.abs(), MAX_FRACTION_DIGITS);
    let frac_part = frac_part.trim_end_matches('0');

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    if is_zero {
        return "0".to_string();
    }

    let mut out = String::with_capacity(int_part.len() * 2 + frac_part.len());
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Formats an amount prefixed with a currency symbol, e.g. `"₦1,234"`.
pub fn format_currency(symbol: &str, value: f64) -> String {
    format!("{}{}", symbol, format_amount(value))
}

/// Rounds a non-negative value to `digits` fraction digits, ties away from
/// zero. Works on the shortest round-trip decimal string, so `0.0625`
/// becomes `("0", "063")` rather than following binary ties-to-even.
fn round_half_up(value: f64, digits: usize) -> (String, String) {
    // f64 Display never switches to exponent notation.
    let repr = value.to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    if frac_part.len() <= digits {
        return (int_part.to_string(), frac_part.to_string());
    }

    let round_up = frac_part.as_bytes()[digits] >= b'5';
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();

    if round_up {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - digits;
    let int_out: String = kept[..split].iter().map(|&b| b as char).collect();
    let frac_out: String = kept[split..].iter().map(|&b| b as char).collect();
    (int_out, frac_out)
}

/// Inserts a comma every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(format_amount(f64::NAN), "0");
        assert_eq!(format_amount(f64::INFINITY), "0");
        assert_eq!(format_amount(f64::NEG_INFINITY), "0");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(98.0), "98");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1234.0), "1,234");
        assert_eq!(format_amount(100000.0), "100,000");
        assert_eq!(format_amount(1234567.0), "1,234,567");
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(format_amount(1234.5), "1,234.5");
        assert_eq!(format_amount(147.25), "147.25");
        assert_eq!(format_amount(0.12345), "0.123");
        assert_eq!(format_amount(32.666666), "32.667");
        assert_eq!(format_amount(0.0001), "0");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_amount(0.0625), "0.063");
        assert_eq!(format_amount(2.0005), "2.001");
        assert_eq!(format_amount(-0.0625), "-0.063");
        assert_eq!(format_amount(0.0624), "0.062");
        assert_eq!(format_amount(999.9995), "1,000");
        assert_eq!(format_amount(0.9996), "1");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_amount(-1500.0), "-1,500");
        assert_eq!(format_amount(-0.0001), "0");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("₦", 1234.0), "₦1,234");
        assert_eq!(format_currency("₦", f64::NAN), "₦0");
    }
}
