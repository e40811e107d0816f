//! # cardcalc-core: Pure Calculation Logic for CardCalc
//!
//! This crate holds everything CardCalc computes: fraction parsing, amount
//! formatting, the pricing catalog, the quantity ledger, session snapshots and
//! the receipt projection. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CardCalc Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI Host (screens, export)                    │   │
//! │  │   Calculator ──► Confirm ──► History ──► Receipt ──► Image      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                cardcalc-app (state + commands)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cardcalc-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │ fraction │ │ catalog  │ │  ledger  │ │ session, receipt │  │   │
//! │  │   │  format  │ │ defaults │ │  totals  │ │    snapshots     │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO LOGGING • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             cardcalc-store (key-value persistence)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Network, Denomination, Price
//! - [`fraction`] - Quantity text parsing ("1 1/2" → 1.5)
//! - [`format`] - en-NG amount formatting
//! - [`catalog`] - Pricing catalog with built-in defaults
//! - [`ledger`] - Draft quantities and their totals
//! - [`session`] - Confirmed session records
//! - [`receipt`] - Read-only receipt projection
//! - [`validation`] - Input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cardcalc_core::{Denomination, Network, PriceCatalog, QuantityLedger};
//!
//! let catalog = PriceCatalog::defaults();
//! let mut ledger = QuantityLedger::new();
//!
//! ledger.set_quantity(Network::Mtn, Denomination::new(100), "1 1/2");
//!
//! let total = ledger.overall_total(&catalog);
//! assert_eq!(total, 1.5 * 98.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod format;
pub mod fraction;
pub mod ledger;
pub mod receipt;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::PriceCatalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use format::{format_amount, format_currency};
pub use fraction::{is_countable, parse_fraction};
pub use ledger::QuantityLedger;
pub use receipt::{Receipt, ReceiptLine};
pub use session::{Session, SessionId, SessionIdGenerator, SessionItem};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol shown in front of every amount.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₦";

/// Title printed at the top of a receipt.
pub const RECEIPT_TITLE: &str = "Purchase Receipt";
