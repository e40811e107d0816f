//! # CardCalc Application Library
//!
//! State objects and command functions for a CardCalc UI host. The host
//! owns rendering and navigation; everything it shows comes from here.
//!
//! ## Module Organization
//! ```text
//! cardcalc_app/
//! ├── lib.rs          ◄─── You are here (startup, tracing)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration state
//! │   ├── ledger.rs   ◄─── Draft quantities
//! │   ├── catalog.rs  ◄─── Price catalog
//! │   └── history.rs  ◄─── Session manager
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── ledger.rs   ◄─── Calculator commands
//! │   ├── prices.rs   ◄─── Price commands
//! │   ├── session.rs  ◄─── Session and receipt commands
//! │   └── export.rs   ◄─── Receipt image export
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cardcalc_store::{
    CatalogRepository, DbConfig, HistoryRepository, SharedStore, SqliteStore, StoreError,
    StoreResult,
};
use state::{CatalogState, ConfigState, HistoryState, LedgerState};

/// Every state object a host manages.
#[derive(Debug)]
pub struct AppServices {
    pub config: ConfigState,
    pub ledger: LedgerState,
    pub catalog: CatalogState,
    pub history: HistoryState,
}

impl AppServices {
    /// Opens the SQLite store named by `config` and loads the state.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Create the data directory                                          │
    /// │  2. Connect to SQLite (WAL) and run pending migrations                 │
    /// │  3. Load the price catalog, merged over defaults                       │
    /// │  4. Empty ledger, session manager over the history key                 │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn open(config: ConfigState) -> StoreResult<Self> {
        if let Some(dir) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| {
                StoreError::ConnectionFailed(format!("{}: {}", dir.display(), e))
            })?;
        }

        info!(db_path = %config.db_path.display(), "Opening CardCalc data");
        let store = SqliteStore::new(DbConfig::new(&config.db_path)).await?;

        Ok(AppServices::with_store(config, Arc::new(store)).await)
    }

    /// Builds the state over any store.
    pub async fn with_store(config: ConfigState, store: SharedStore) -> Self {
        let catalog = CatalogState::load(CatalogRepository::new(store.clone())).await;
        let history = HistoryState::new(HistoryRepository::new(store));

        info!("State initialized");
        AppServices {
            config,
            ledger: LedgerState::new(),
            catalog,
            history,
        }
    }
}

/// Installs the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cardcalc=trace` - Trace for cardcalc crates only
/// - Default: `info,cardcalc=debug,sqlx=warn`
///
/// Calling it again after a subscriber is installed does nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cardcalc=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
