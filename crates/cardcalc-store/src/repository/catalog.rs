//! # Catalog Repository
//!
//! Loads and saves the pricing catalog under the `"prices"` key.
//!
//! ## Load Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  store.get("prices")                                                   │
//! │       │                                                                 │
//! │       ├── missing / bad JSON ──► persisted = {} (warn)                 │
//! │       ├── read failed ─────────► defaults in memory, no write-back     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  drop unknown networks and zero denominations (warn)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  merged = defaults ⊕ persisted   (persisted wins on matching keys)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.set("prices", merged) ── failure logged only                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::{debug, warn};

use cardcalc_core::{Denomination, Network, PriceCatalog, Price};

use crate::error::{StoreError, StoreResult};
use crate::kv::SharedStore;
use crate::PRICES_KEY;

/// Stored shape before network names are checked.
type RawCatalog = BTreeMap<String, BTreeMap<Denomination, Price>>;

/// Repository for the pricing catalog.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CatalogRepository::new(store);
///
/// let catalog = repo.load().await;
/// let catalog = repo.set_price(catalog, Network::Mtn, Denomination::new(100), "90").await;
/// ```
#[derive(Clone)]
pub struct CatalogRepository {
    store: SharedStore,
    defaults: PriceCatalog,
}

impl CatalogRepository {
    /// Creates a repository merging over the built-in defaults.
    pub fn new(store: SharedStore) -> Self {
        CatalogRepository::with_defaults(store, PriceCatalog::defaults())
    }

    /// Creates a repository merging over a custom default catalog.
    pub fn with_defaults(store: SharedStore, defaults: PriceCatalog) -> Self {
        CatalogRepository { store, defaults }
    }

    /// Loads the catalog, merged over the defaults.
    ///
    /// Never fails: any read or decode problem falls back to the defaults.
    /// After a successful read the merged result is written back so new
    /// default entries become persisted. A failed read writes nothing, so
    /// the stored prices survive until the store is readable again.
    pub async fn load(&self) -> PriceCatalog {
        let (persisted, write_back) = match self.read_persisted().await {
            Ok(Some(catalog)) => (catalog, true),
            Ok(None) => {
                debug!("No persisted prices, using defaults");
                (PriceCatalog::default(), true)
            }
            Err(StoreError::Serialization { message, .. }) => {
                warn!(error = %message, "Persisted prices unreadable, using defaults");
                (PriceCatalog::default(), true)
            }
            Err(e) => {
                warn!(error = %e, "Could not read persisted prices, using defaults");
                (PriceCatalog::default(), false)
            }
        };

        let merged = PriceCatalog::merged_over(&self.defaults, &persisted);

        if write_back {
            if let Err(e) = self.save(&merged).await {
                warn!(error = %e, "Could not write merged prices back");
            }
        }

        debug!(entries = merged.len(), "Price catalog loaded");
        merged
    }

    /// Persists the full catalog.
    pub async fn save(&self, catalog: &PriceCatalog) -> StoreResult<()> {
        let json =
            serde_json::to_string(catalog).map_err(|e| StoreError::serialization(PRICES_KEY, e))?;
        self.store.set(PRICES_KEY, &json).await
    }

    /// Applies one price edit and persists the catalog best-effort.
    ///
    /// The edit is returned even when the write fails; the failure is
    /// logged and not surfaced.
    pub async fn set_price(
        &self,
        mut catalog: PriceCatalog,
        network: Network,
        denomination: Denomination,
        raw: &str,
    ) -> PriceCatalog {
        let price = catalog.set_price(network, denomination, raw);
        debug!(%network, %denomination, price, "Price updated");

        if let Err(e) = self.save(&catalog).await {
            warn!(error = %e, %network, %denomination, "Could not persist price edit");
        }

        catalog
    }

    async fn read_persisted(&self) -> StoreResult<Option<PriceCatalog>> {
        let Some(json) = self.store.get(PRICES_KEY).await? else {
            return Ok(None);
        };

        let raw: RawCatalog =
            serde_json::from_str(&json).map_err(|e| StoreError::serialization(PRICES_KEY, e))?;

        Ok(Some(known_entries(raw)))
    }
}

impl std::fmt::Debug for CatalogRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogRepository")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// Keeps entries whose network is known and whose denomination is positive.
fn known_entries(raw: RawCatalog) -> PriceCatalog {
    let mut map = BTreeMap::new();

    for (name, prices) in raw {
        let network = match Network::from_str(&name) {
            Ok(network) => network,
            Err(_) => {
                warn!(network = %name, "Dropping prices for unknown network");
                continue;
            }
        };

        let prices: BTreeMap<Denomination, Price> = prices
            .into_iter()
            .filter(|(denomination, _)| {
                let keep = denomination.value() > 0;
                if !keep {
                    warn!(%network, "Dropping zero denomination");
                }
                keep
            })
            .collect();

        map.insert(network, prices);
    }

    PriceCatalog::from_map(map)
}

// =============================================================================
// Unit Tests
// =============================================================================
