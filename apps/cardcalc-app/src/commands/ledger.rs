//! # Ledger Commands
//!
//! Commands behind the calculator screen.
//!
//! ## Calculator Screen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MTN                                                                    │
//! │  ┌────────────┬────────────┬─────────────┬──────────────┐               │
//! │  │ Denom.     │ Price      │ Qty         │ Total        │               │
//! │  ├────────────┼────────────┼─────────────┼──────────────┤               │
//! │  │ 100        │ ₦98        │ [1 1/2    ] │ ₦147         │               │
//! │  │ 200        │ ₦196       │ [         ] │ ₦0           │               │
//! │  └────────────┴────────────┴─────────────┴──────────────┘               │
//! │  ...                                                                    │
//! │  Overall Total                                     ₦147                 │
//! │                                                                         │
//! │  set_quantity({ network: 'MTN', denomination: 100, quantity: '1 1/2' }) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use cardcalc_core::{CoreError, Denomination, Network, Price, PriceCatalog, QuantityLedger};

use crate::error::ApiResult;
use crate::state::{CatalogState, ConfigState, LedgerState};

/// One calculator cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    pub network: Network,
    pub denomination: Denomination,
    pub price: Price,
    /// Text as typed; empty when nothing was typed.
    pub quantity: String,
    /// Row total; non-finite results are reported as 0.
    pub total: f64,
    pub display_total: String,
}

/// Whole calculator screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerResponse {
    pub rows: Vec<LedgerRow>,
    pub overall_total: f64,
    pub display_total: String,
    /// Whether "Save Session" would accept this ledger.
    pub has_items: bool,
}

impl LedgerResponse {
    /// One row per catalog price, in display order.
    pub fn build(ledger: &QuantityLedger, catalog: &PriceCatalog, config: &ConfigState) -> Self {
        let rows = catalog
            .entries()
            .map(|(network, denomination, price)| {
                let total = ledger
                    .total_for(network, denomination, catalog)
                    .ok()
                    .filter(|t| t.is_finite())
                    .unwrap_or(0.0);
                LedgerRow {
                    network,
                    denomination,
                    price,
                    quantity: ledger
                        .quantity(network, denomination)
                        .unwrap_or_default()
                        .to_string(),
                    total,
                    display_total: config.format_currency(total),
                }
            })
            .collect();

        let overall_total = ledger.overall_total(catalog);
        LedgerResponse {
            rows,
            overall_total,
            display_total: config.format_currency(overall_total),
            has_items: !ledger.snapshot_items(catalog).is_empty(),
        }
    }
}

/// Current calculator contents.
pub fn get_ledger(
    ledger: &LedgerState,
    catalog: &CatalogState,
    config: &ConfigState,
) -> LedgerResponse {
    debug!("get_ledger command");
    let prices = catalog.snapshot();
    ledger.with_ledger(|l| LedgerResponse::build(l, &prices, config))
}

/// Records the text typed into one cell.
///
/// The quantity text is stored as-is; only the cell key is checked.
///
/// ## Errors
/// - `VALIDATION_ERROR` for an unknown network or a zero denomination
/// - `NOT_FOUND` when the catalog has no price for the cell
pub fn set_quantity(
    ledger: &LedgerState,
    catalog: &CatalogState,
    config: &ConfigState,
    network: &str,
    denomination: u32,
    quantity: String,
) -> ApiResult<LedgerResponse> {
    debug!(network = %network, denomination, quantity = %quantity, "set_quantity command");

    let network = Network::from_str(network)?;
    cardcalc_core::validation::validate_denomination(denomination)?;
    let denomination = Denomination::new(denomination);

    let prices = catalog.snapshot();
    if !prices.contains(network, denomination) {
        return Err(CoreError::PriceNotFound {
            network,
            denomination,
        }
        .into());
    }

    Ok(ledger.with_ledger_mut(|l| {
        l.set_quantity(network, denomination, quantity);
        LedgerResponse::build(l, &prices, config)
    }))
}

/// Empties every cell.
pub fn clear_ledger(
    ledger: &LedgerState,
    catalog: &CatalogState,
    config: &ConfigState,
) -> LedgerResponse {
    debug!("clear_ledger command");
    let prices = catalog.snapshot();
    ledger.with_ledger_mut(|l| {
        l.clear();
        LedgerResponse::build(l, &prices, config)
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ErrorCode;
    use cardcalc_store::{CatalogRepository, MemoryStore};

    async fn fixture() -> (LedgerState, CatalogState, ConfigState) {
        let catalog =
            CatalogState::load(CatalogRepository::new(Arc::new(MemoryStore::new()))).await;
        (LedgerState::new(), catalog, ConfigState::default())
    }

    #[tokio::test]
    async fn test_empty_ledger_lists_every_price() {
        let (ledger, catalog, config) = fixture().await;

        let response = get_ledger(&ledger, &catalog, &config);

        assert_eq!(response.rows.len(), 12);
        assert_eq!(response.rows[0].network, Network::Mtn);
        assert_eq!(response.overall_total, 0.0);
        assert_eq!(response.display_total, "₦0");
        assert!(!response.has_items);
    }

    #[tokio::test]
    async fn test_set_quantity_updates_totals() {
        let (ledger, catalog, config) = fixture().await;

        set_quantity(&ledger, &catalog, &config, "MTN", 100, "1 1/2".to_string()).unwrap();
        let response =
            set_quantity(&ledger, &catalog, &config, "GLO", 1000, "2".to_string()).unwrap();

        let mtn = response
            .rows
            .iter()
            .find(|r| r.network == Network::Mtn && r.denomination == Denomination::new(100))
            .unwrap();
        assert_eq!(mtn.quantity, "1 1/2");
        assert_eq!(mtn.total, 147.0);
        assert_eq!(response.overall_total, 147.0 + 1900.0);
        assert_eq!(response.display_total, "₦2,047");
        assert!(response.has_items);
    }

    #[tokio::test]
    async fn test_malformed_quantity_counts_as_zero() {
        let (ledger, catalog, config) = fixture().await;

        let response =
            set_quantity(&ledger, &catalog, &config, "Airtel", 200, "1/0".to_string()).unwrap();

        assert!(response.rows.iter().all(|r| r.total == 0.0));
        assert_eq!(response.overall_total, 0.0);
        assert!(!response.has_items);
    }

    #[tokio::test]
    async fn test_set_quantity_rejects_bad_cells() {
        let (ledger, catalog, config) = fixture().await;

        let err = set_quantity(&ledger, &catalog, &config, "Etisalat", 100, "1".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = set_quantity(&ledger, &catalog, &config, "MTN", 0, "1".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = set_quantity(&ledger, &catalog, &config, "MTN", 750, "1".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        assert!(ledger.with_ledger(|l| l.is_empty()));
    }

    #[tokio::test]
    async fn test_clear_ledger() {
        let (ledger, catalog, config) = fixture().await;
        set_quantity(&ledger, &catalog, &config, "MTN", 500, "4".to_string()).unwrap();

        let response = clear_ledger(&ledger, &catalog, &config);

        assert!(response.rows.iter().all(|r| r.quantity.is_empty()));
        assert_eq!(response.overall_total, 0.0);
    }
}
