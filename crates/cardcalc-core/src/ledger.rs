//! # Quantity Ledger
//!
//! The draft being typed on the calculator screen: one raw quantity string
//! per (network, denomination).
//!
//! ## Ledger Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Operations                                    │
//! │                                                                         │
//! │  User Action              Ledger Call               Effect              │
//! │  ───────────              ───────────               ──────              │
//! │                                                                         │
//! │  Type "1 1/2" ──────────► set_quantity() ─────────► raw text stored     │
//! │                                                                         │
//! │  Row total ─────────────► total_for() ────────────► parse × price       │
//! │                                                                         │
//! │  Header total ──────────► overall_total() ────────► Σ countable rows    │
//! │                                                                         │
//! │  Save Session ──────────► snapshot_items() ───────► SessionItem list    │
//! │                                                                         │
//! │  Clear ─────────────────► clear() ────────────────► empty               │
//! │                                                                         │
//! │  After save ────────────► clear_unchanged() ──────► later edits kept    │
//! │                                                                         │
//! │  A row counts only when its parsed quantity is finite and > 0.          │
//! │  "0", "", "-3", "abc" and "1/0" are kept as typed but count for nothing.│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::PriceCatalog;
use crate::error::{CoreError, CoreResult};
use crate::fraction::{is_countable, parse_fraction};
use crate::session::SessionItem;
use crate::types::{Denomination, Network, Price};

/// One typed quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LedgerEntry {
    pub network: Network,
    pub denomination: Denomination,
    /// Raw text as typed; validated only when totals are computed.
    pub quantity: String,
}

impl LedgerEntry {
    /// Parsed quantity (may be NaN or non-positive).
    pub fn parsed_quantity(&self) -> f64 {
        parse_fraction(&self.quantity)
    }

    fn is_for(&self, network: Network, denomination: Denomination) -> bool {
        self.network == network && self.denomination == denomination
    }
}

/// Draft quantities keyed by (network, denomination).
///
/// ## Invariants
/// - At most one entry per key
/// - Entries keep the position of their first insertion; overwriting a key
///   does not move it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityLedger {
    entries: Vec<LedgerEntry>,
}

impl QuantityLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        QuantityLedger::default()
    }

    /// Records or overwrites the raw quantity text for a key.
    pub fn set_quantity(
        &mut self,
        network: Network,
        denomination: Denomination,
        raw: impl Into<String>,
    ) {
        let raw = raw.into();
        match self
            .entries
            .iter_mut()
            .find(|e| e.is_for(network, denomination))
        {
            Some(entry) => entry.quantity = raw,
            None => self.entries.push(LedgerEntry {
                network,
                denomination,
                quantity: raw,
            }),
        }
    }

    /// Raw text for a key, if anything was typed.
    pub fn quantity(&self, network: Network, denomination: Denomination) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.is_for(network, denomination))
            .map(|e| e.quantity.as_str())
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Row total: parsed quantity × unit price.
    ///
    /// A key with nothing typed parses as 0. The result is not filtered, so a
    /// malformed quantity yields NaN; the formatter shows that as "0".
    ///
    /// ## Errors
    /// [`CoreError::PriceNotFound`] when the catalog has no price for the pair.
    pub fn total_for(
        &self,
        network: Network,
        denomination: Denomination,
        catalog: &PriceCatalog,
    ) -> CoreResult<f64> {
        let price = catalog
            .price(network, denomination)
            .ok_or(CoreError::PriceNotFound {
                network,
                denomination,
            })?;
        let quantity = parse_fraction(self.quantity(network, denomination).unwrap_or(""));
        Ok(quantity * price as f64)
    }

    /// Sum of row totals over every countable entry.
    ///
    /// Entries whose pair is missing from the catalog are skipped.
    pub fn overall_total(&self, catalog: &PriceCatalog) -> f64 {
        self.countable(catalog)
            .map(|(_, quantity, price)| quantity * price as f64)
            .sum()
    }

    /// Returns true when at least one entry has a positive quantity.
    pub fn has_countable_entries(&self) -> bool {
        self.entries
            .iter()
            .any(|e| is_countable(e.parsed_quantity()))
    }

    /// Freezes every countable entry into a [`SessionItem`] at current prices.
    ///
    /// An empty result means there is nothing to save.
    pub fn snapshot_items(&self, catalog: &PriceCatalog) -> Vec<SessionItem> {
        self.countable(catalog)
            .map(|(entry, _, price)| {
                SessionItem::new(entry.network, entry.denomination, entry.quantity.clone(), price)
            })
            .collect()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Removes the entries whose text still matches `snapshot`.
    ///
    /// Cells edited or added after the snapshot was taken are kept.
    pub fn clear_unchanged(&mut self, snapshot: &QuantityLedger) {
        self.entries.retain(|entry| {
            snapshot.quantity(entry.network, entry.denomination) != Some(entry.quantity.as_str())
        });
    }

    /// Returns the number of keys with typed text.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn countable<'a>(
        &'a self,
        catalog: &'a PriceCatalog,
    ) -> impl Iterator<Item = (&'a LedgerEntry, f64, Price)> + 'a {
        self.entries.iter().filter_map(move |entry| {
            let quantity = entry.parsed_quantity();
            if !is_countable(quantity) {
                return None;
            }
            let price = catalog.price(entry.network, entry.denomination)?;
            Some((entry, quantity, price))
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
