//! # Error Types
//!
//! Domain-specific error types for cardcalc-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cardcalc-core errors (this file)                                      │
//! │  ├── CoreError        - Calculation and session rule violations        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cardcalc-store errors (separate crate)                                │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  cardcalc-app errors                                                   │
//! │  └── ApiError         - What the UI host sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI notice              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantity and price text never produce errors: unparseable input recovers
//! to zero inside the parser. Errors here are reserved for rules the caller
//! must react to.

use thiserror::Error;

use crate::types::{Denomination, Network};

// =============================================================================
// Core Error
// =============================================================================

/// Core calculation errors.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Nothing in the ledger has a positive quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "Save Session"
    ///      │
    ///      ▼
    /// snapshot_items() → []
    ///      │
    ///      ▼
    /// EmptySession
    ///      │
    ///      ▼
    /// UI shows: "Please add quantities before saving."
    /// ```
    #[error("No items with a positive quantity to save")]
    EmptySession,

    /// The catalog has no unit price for this network/denomination pair.
    #[error("No price for {network} {denomination}")]
    PriceNotFound {
        network: Network,
        denomination: Denomination,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a denomination that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PriceNotFound {
            network: Network::Glo,
            denomination: Denomination::new(750),
        };
        assert_eq!(err.to_string(), "No price for GLO 750");
        assert_eq!(
            CoreError::EmptySession.to_string(),
            "No items with a positive quantity to save"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "network".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
