//! # State Module
//!
//! Application state, one type per concern. Commands take only the state
//! they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ LedgerState  │ │ CatalogState │ │ HistoryState │ │ ConfigState  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ Arc<Mutex<   │ │ Arc<RwLock<  │ │ History      │ │ db path      │   │
//! │  │  Quantity    │ │  PriceCatalog│ │ Repository + │ │ currency     │   │
//! │  │  Ledger>>    │ │ >> + repo    │ │ id generator │ │ receipt width│   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Locks are taken inside short closures, never across .await          │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod history;
mod ledger;

pub use catalog::CatalogState;
pub use config::ConfigState;
pub use history::HistoryState;
pub use ledger::LedgerState;
