//! # Catalog State
//!
//! Process-wide pricing catalog, loaded once at startup and written back on
//! every edit.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::debug;

use cardcalc_core::{Denomination, Network, Price, PriceCatalog};
use cardcalc_store::CatalogRepository;

/// Shared catalog plus its repository.
///
/// Edits are serialized by `edits` so each one starts from the result of
/// the previous one; readers never wait on the store.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<RwLock<PriceCatalog>>,
    edits: Arc<Mutex<()>>,
    repo: CatalogRepository,
}

impl CatalogState {
    /// Loads the catalog (merged over defaults) from the repository.
    pub async fn load(repo: CatalogRepository) -> Self {
        let catalog = repo.load().await;
        CatalogState {
            catalog: Arc::new(RwLock::new(catalog)),
            edits: Arc::new(Mutex::new(())),
            repo,
        }
    }

    /// Copy of the current catalog.
    pub fn snapshot(&self) -> PriceCatalog {
        self.with_catalog(PriceCatalog::clone)
    }

    /// Runs `f` with read access to the catalog.
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PriceCatalog) -> R,
    {
        let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        f(&catalog)
    }

    /// Replaces one price from raw text and persists the catalog.
    ///
    /// The in-memory edit always applies. A failed write is logged and
    /// otherwise ignored.
    pub async fn set_price(
        &self,
        network: Network,
        denomination: Denomination,
        raw: &str,
    ) -> (Price, PriceCatalog) {
        let _edit = self.edits.lock().await;

        let updated = self
            .repo
            .set_price(self.snapshot(), network, denomination, raw)
            .await;
        let price = updated.price(network, denomination).unwrap_or_default();

        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = updated.clone();

        debug!(%network, %denomination, price, "Catalog price set");
        (price, updated)
    }
}
