//! # Validation Module
//!
//! Input rules for CardCalc.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Quantity text ("1 1/2", "abc")                                        │
//! │  └── never rejected; parsed leniently, non-positive counts as nothing  │
//! │                                                                         │
//! │  Price text ("95", "9.5", "")                                          │
//! │  └── never rejected; anything but a non-negative integer becomes 0     │
//! │                                                                         │
//! │  Network / denomination identifiers                                    │
//! │  └── THIS MODULE: rejected when outside the closed set / not positive  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cardcalc_core::validation::{parse_price_text, validate_denomination};
//!
//! assert_eq!(parse_price_text(" 95 "), 95);
//! assert_eq!(parse_price_text("9.5"), 0);
//! assert!(validate_denomination(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::Price;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a denomination face value.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_denomination(value: u32) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::MustBePositive {
            field: "denomination".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (price not set yet)
pub fn validate_price(price: Price) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Text Parsers
// =============================================================================

/// Parses price text typed on the prices screen.
///
/// Never fails. Empty, non-integer, unparseable and negative text all
/// become 0 so that a half-typed field never blocks the edit.
///
/// ```text
/// "95"    → 95
/// " 120 " → 120
/// "9.5"   → 0
/// "abc"   → 0
/// "-3"    → 0
/// ""      → 0
/// ```
pub fn parse_price_text(raw: &str) -> Price {
    raw.trim()
        .parse::<Price>()
        .ok()
        .filter(|price| validate_price(*price).is_ok())
        .unwrap_or(0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_denomination() {
        assert!(validate_denomination(100).is_ok());
        assert!(validate_denomination(1).is_ok());
        assert!(validate_denomination(0).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(98).is_ok());
        assert!(validate_price(-1).is_err());
    }

    #[test]
    fn test_parse_price_text() {
        assert_eq!(parse_price_text("95"), 95);
        assert_eq!(parse_price_text("  1200 "), 1200);
        assert_eq!(parse_price_text(""), 0);
        assert_eq!(parse_price_text("abc"), 0);
        assert_eq!(parse_price_text("9.5"), 0);
        assert_eq!(parse_price_text("-40"), 0);
    }
}
