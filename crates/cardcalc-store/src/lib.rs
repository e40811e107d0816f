//! # cardcalc-store: Persistence Layer for CardCalc
//!
//! CardCalc persists two JSON documents in a string-keyed store: the
//! pricing catalog under `"prices"` and the session history under
//! `"sessionsHistory"`. This crate provides the store abstraction, two
//! backends, and a repository for each document.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CardCalc Data Flow                               │
//! │                                                                         │
//! │  cardcalc-app state (CatalogState, HistoryState)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   cardcalc-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────┐    ┌────────────────────────────────┐   │   │
//! │  │   │  Repositories    │    │  KeyValueStore (trait)         │   │   │
//! │  │   │                  │    │                                │   │   │
//! │  │   │ CatalogRepository│───►│  MemoryStore  (tests)          │   │   │
//! │  │   │ HistoryRepository│    │  SqliteStore  (kv_entries)     │   │   │
//! │  │   └──────────────────┘    └────────────────────────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/cardcalc.db                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - `KeyValueStore` trait and the in-memory backend
//! - [`pool`] - SQLite backend: pool creation and configuration
//! - [`migrations`] - Embedded migrations
//! - [`error`] - Store error types
//! - [`repository`] - Catalog and history repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cardcalc_store::{DbConfig, SqliteStore};
//!
//! let store = SqliteStore::new(DbConfig::new("path/to/cardcalc.db")).await?;
//!
//! let catalog = store.catalog().load().await;
//! let sessions = store.history().list_sessions().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{KeyValueStore, MemoryStore, SharedStore};
pub use pool::{DbConfig, SqliteStore};

pub use repository::catalog::CatalogRepository;
pub use repository::history::HistoryRepository;

// =============================================================================
// Storage Keys
// =============================================================================

/// Key holding the JSON-encoded pricing catalog.
pub const PRICES_KEY: &str = "prices";

/// Key holding the JSON-encoded session list.
pub const HISTORY_KEY: &str = "sessionsHistory";
