//! # Fraction Parser
//!
//! Turns free-form quantity text into a number.
//!
//! ## Accepted Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input        Rule                                    Result            │
//! │  ──────────   ─────────────────────────────────────   ──────────        │
//! │  ""           empty                                   0                 │
//! │  "3"          plain number                            3                 │
//! │  "1/2"        numerator ÷ denominator                 0.5               │
//! │  "1 1/2"      split at first space, parse both, sum   1.5               │
//! │  "12abc"      leading numeric prefix                  12                │
//! │  "abc"        no numeric prefix                       NaN               │
//! │  "1/0"        no guard on zero denominators           +∞                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The parser never fails. Callers decide whether a quantity counts with
//! [`is_countable`], which rejects NaN, infinities, zero and negatives.

/// Parses quantity text such as `"3"`, `"1/2"` or `"1 1/2"`.
///
/// ## Example
/// ```rust
/// use cardcalc_core::fraction::parse_fraction;
///
/// assert_eq!(parse_fraction(""), 0.0);
/// assert_eq!(parse_fraction("1/2"), 0.5);
/// assert_eq!(parse_fraction("1 1/2"), 1.5);
/// assert!(parse_fraction("abc").is_nan());
/// ```
pub fn parse_fraction(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some((whole, fraction)) = trimmed.split_once(' ') {
        return parse_fraction(whole) + parse_fraction(fraction);
    }

    if let Some((numerator, denominator)) = trimmed.split_once('/') {
        return parse_float_prefix(numerator) / parse_float_prefix(denominator);
    }

    parse_float_prefix(trimmed)
}

/// Returns true when a parsed quantity should count toward totals.
#[inline]
pub fn is_countable(quantity: f64) -> bool {
    quantity.is_finite() && quantity > 0.0
}

/// Parses the longest leading decimal number in `text`.
///
/// Grammar: `[+-]? digits* ('.' digits*)? ([eE] [+-]? digits+)?` with at least
/// one mantissa digit. Anything after the match is ignored; no match is NaN.
fn parse_float_prefix(text: &str) -> f64 {
    let bytes = text.trim_start().as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &bytes[int_start..pos];

    let mut frac_digits: &[u8] = &[];
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &bytes[frac_start..end];
        pos = end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return f64::NAN;
    }

    let mut exponent: &[u8] = &[];
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exponent = &bytes[pos + 1..end];
        }
    }

    // Rebuild a canonical literal: "0" for a missing integer part, no
    // dangling '.', so the std parser always accepts it.
    let mut literal = String::with_capacity(int_digits.len() + frac_digits.len() + 8);
    if negative {
        literal.push('-');
    }
    if int_digits.is_empty() {
        literal.push('0');
    } else {
        literal.push_str(&String::from_utf8_lossy(int_digits));
    }
    if !frac_digits.is_empty() {
        literal.push('.');
        literal.push_str(&String::from_utf8_lossy(frac_digits));
    }
    if !exponent.is_empty() {
        literal.push('e');
        literal.push_str(&String::from_utf8_lossy(exponent));
    }

    literal.parse::<f64>().unwrap_or(f64::NAN)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(parse_fraction(""), 0.0);
        assert_eq!(parse_fraction("   "), 0.0);
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_fraction("2"), 2.0);
        assert_eq!(parse_fraction(" 3 "), 3.0);
        assert_eq!(parse_fraction("2.5"), 2.5);
        assert_eq!(parse_fraction(".5"), 0.5);
        assert_eq!(parse_fraction("4."), 4.0);
        assert_eq!(parse_fraction("-3"), -3.0);
        assert_eq!(parse_fraction("1e2"), 100.0);
    }

    #[test]
    fn test_fractions() {
        assert_eq!(parse_fraction("1/2"), 0.5);
        assert_eq!(parse_fraction("3/4"), 0.75);
        assert_eq!(parse_fraction("1/2/3"), 0.5);
    }

    #[test]
    fn test_mixed_numbers() {
        assert_eq!(parse_fraction("1 1/2"), 1.5);
        assert_eq!(parse_fraction("2 3/4"), 2.75);
        assert_eq!(parse_fraction("1  1/2"), 1.5);
    }

    #[test]
    fn test_leading_prefix_wins() {
        assert_eq!(parse_fraction("12abc"), 12.0);
        assert_eq!(parse_fraction("1e"), 1.0);
    }

    #[test]
    fn test_malformed_is_nan() {
        assert!(parse_fraction("abc").is_nan());
        assert!(parse_fraction("-").is_nan());
        assert!(parse_fraction("/2").is_nan());
        assert!(parse_fraction("1/").is_nan());
    }

    #[test]
    fn test_zero_denominator_is_not_finite() {
        assert_eq!(parse_fraction("1/0"), f64::INFINITY);
        assert!(parse_fraction("0/0").is_nan());
    }

    #[test]
    fn test_is_countable() {
        assert!(is_countable(parse_fraction("1/2")));
        assert!(is_countable(parse_fraction("3")));
        assert!(!is_countable(parse_fraction("")));
        assert!(!is_countable(parse_fraction("0")));
        assert!(!is_countable(parse_fraction("-3")));
        assert!(!is_countable(parse_fraction("abc")));
        assert!(!is_countable(parse_fraction("1/0")));
    }
}
