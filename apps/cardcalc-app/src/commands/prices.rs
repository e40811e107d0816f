//! # Price Commands
//!
//! Reading and editing the pricing catalog from the settings screen.

use std::str::FromStr;

use tracing::debug;

use cardcalc_core::{Denomination, Network, PriceCatalog};

use crate::error::ApiResult;
use crate::state::CatalogState;

/// The catalog as a host renders it:
/// `{"MTN": {"100": 98, ...}, "Airtel": {...}, "GLO": {...}}`.
pub fn get_prices(catalog: &CatalogState) -> PriceCatalog {
    debug!("get_prices command");
    catalog.snapshot()
}

/// Sets one price from the text typed in the settings screen.
///
/// Text that is not a non-negative whole number stores 0. A failed save is
/// logged and does not fail the command.
///
/// ## Errors
/// `VALIDATION_ERROR` for an unknown network or a zero denomination.
pub async fn set_price(
    catalog: &CatalogState,
    network: &str,
    denomination: u32,
    price: &str,
) -> ApiResult<PriceCatalog> {
    debug!(network = %network, denomination, price = %price, "set_price command");

    let network = Network::from_str(network)?;
    cardcalc_core::validation::validate_denomination(denomination)?;

    let (_, updated) = catalog
        .set_price(network, Denomination::new(denomination), price)
        .await;
    Ok(updated)
}
