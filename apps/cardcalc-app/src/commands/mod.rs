//! # Commands Module
//!
//! Every operation a UI host invokes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports, Notice)
//! ├── ledger.rs   ◄─── Calculator cells and totals
//! ├── prices.rs   ◄─── Price catalog edits
//! ├── session.rs  ◄─── Confirm, history, receipts
//! └── export.rs   ◄─── Receipt image export
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn get_prices(catalog: &CatalogState)
//!
//! // Needs ledger, catalog and config
//! fn set_quantity(ledger: &LedgerState, catalog: &CatalogState, config: &ConfigState, ...)
//!
//! // Session manager plus what it freezes
//! async fn confirm_session(history: &HistoryState, ledger: &LedgerState, catalog: &CatalogState)
//! ```

use serde::{Deserialize, Serialize};

pub mod export;
pub mod ledger;
pub mod prices;
pub mod session;

/// Non-error message for the host to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            message: message.into(),
        }
    }
}
