//! # Sessions
//!
//! A session is a confirmed, immutable calculation: the countable ledger
//! rows frozen at the prices in force when the user tapped "Save Session".
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Lifecycle                                 │
//! │                                                                         │
//! │  1. DRAFT                                                              │
//! │     └── QuantityLedger (not persisted)                                 │
//! │                                                                         │
//! │  2. CONFIRM                                                            │
//! │     └── Session::from_ledger() → Session { id, date, items, total }    │
//! │     └── appended to history, then the ledger is cleared                │
//! │                                                                         │
//! │  3. VIEW                                                               │
//! │     └── history list (newest first) → Receipt                          │
//! │                                                                         │
//! │  4. (OPTIONAL) DELETE                                                  │
//! │     └── removed from history by id                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::PriceCatalog;
use crate::error::{CoreError, CoreResult};
use crate::fraction::parse_fraction;
use crate::ledger::QuantityLedger;
use crate::types::{Denomination, Network, Price};

/// Session identifier: milliseconds since the Unix epoch, bumped when needed
/// to stay strictly increasing.
pub type SessionId = i64;

// =============================================================================
// Session Item
// =============================================================================

/// One frozen ledger row.
///
/// ## Snapshot Pattern
/// The unit price is copied in, so later catalog edits never change a
/// saved session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionItem {
    pub network: Network,
    pub denomination: Denomination,
    /// Quantity exactly as typed ("1 1/2").
    pub quantity: String,
    /// Unit price at snapshot time.
    pub price: Price,
    /// parsed quantity × price.
    pub total: f64,
}

impl SessionItem {
    /// Creates an item and computes its total.
    pub fn new(
        network: Network,
        denomination: Denomination,
        quantity: impl Into<String>,
        price: Price,
    ) -> Self {
        let quantity = quantity.into();
        let total = parse_fraction(&quantity) * price as f64;
        SessionItem {
            network,
            denomination,
            quantity,
            price,
            total,
        }
    }

    /// Receipt label, e.g. `"MTN 100"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.network, self.denomination)
    }
}

// =============================================================================
// Session
// =============================================================================

/// A confirmed purchase calculation.
///
/// ## Invariants
/// - `overall_total` is the sum of the item totals; it is computed on
///   construction and on decode, never set independently
/// - Items keep ledger insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", from = "SessionRecord")]
#[ts(export)]
pub struct Session {
    id: SessionId,
    /// Creation time, ISO-8601 on the wire.
    #[ts(as = "String")]
    date: DateTime<Utc>,
    items: Vec<SessionItem>,
    overall_total: f64,
}

/// Wire shape accepted on decode; the stored total is recomputed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    id: SessionId,
    date: DateTime<Utc>,
    #[serde(default)]
    items: Vec<SessionItem>,
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        Session::new(record.id, record.date, record.items)
    }
}

impl Session {
    /// Creates a session from already-frozen items.
    pub fn new(id: SessionId, date: DateTime<Utc>, items: Vec<SessionItem>) -> Self {
        let overall_total = items.iter().map(|i| i.total).sum();
        Session {
            id,
            date,
            items,
            overall_total,
        }
    }

    /// Freezes the countable rows of a ledger.
    ///
    /// ## Errors
    /// [`CoreError::EmptySession`] when no row has a positive quantity.
    pub fn from_ledger(
        id: SessionId,
        date: DateTime<Utc>,
        ledger: &QuantityLedger,
        catalog: &PriceCatalog,
    ) -> CoreResult<Self> {
        let items = ledger.snapshot_items(catalog);
        if items.is_empty() {
            return Err(CoreError::EmptySession);
        }
        Ok(Session::new(id, date, items))
    }

    #[inline]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[inline]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn items(&self) -> &[SessionItem] {
        &self.items
    }

    #[inline]
    pub fn overall_total(&self) -> f64 {
        self.overall_total
    }

    /// Number of items, shown as "3 item(s)" in the history list.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Session Id Generator
// =============================================================================

/// Hands out strictly increasing, time-based session ids.
///
/// Two confirms inside the same millisecond still get distinct ids, and a
/// clock that went backwards never produces an id at or below one already
/// stored.
#[derive(Debug, Clone, Default)]
pub struct SessionIdGenerator {
    last: SessionId,
}

impl SessionIdGenerator {
    pub fn new() -> Self {
        SessionIdGenerator::default()
    }

    /// Next id: `max(now in ms, last + 1, floor + 1)`.
    ///
    /// `floor` is the largest id already persisted (0 when history is empty).
    pub fn next_id(&mut self, now: DateTime<Utc>, floor: SessionId) -> SessionId {
        let id = now
            .timestamp_millis()
            .max(self.last + 1)
            .max(floor + 1);
        self.last = id;
        id
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
