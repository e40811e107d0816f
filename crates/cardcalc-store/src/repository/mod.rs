//! # Repository Module
//!
//! Typed access to the two persisted documents.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  App state                                                             │
//! │       │                                                                 │
//! │       │  history.append(session)                                       │
//! │       ▼                                                                 │
//! │  HistoryRepository                                                     │
//! │  ├── load_all / save_all       (strict)                                │
//! │  ├── append / delete_session   (read-all, change, write-all)           │
//! │  └── list_sessions / find      (lenient)                               │
//! │       │                                                                 │
//! │       │  JSON text                                                      │
//! │       ▼                                                                 │
//! │  Arc<dyn KeyValueStore>                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`](catalog::CatalogRepository) - Prices under `"prices"`
//! - [`HistoryRepository`](history::HistoryRepository) - Sessions under `"sessionsHistory"`

pub mod catalog;
pub mod history;

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;

    use crate::error::{StoreError, StoreResult};
    use crate::kv::{KeyValueStore, MemoryStore};

    /// Store that reads through to memory but can be told to fail.
    #[derive(Debug, Default)]
    pub struct FlakyStore {
        pub inner: MemoryStore,
        pub fail_reads: bool,
        pub fail_writes: bool,
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            if self.fail_reads {
                return Err(StoreError::QueryFailed("disk unavailable".to_string()));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            if self.fail_writes {
                return Err(StoreError::QueryFailed("disk full".to_string()));
            }
            self.inner.set(key, value).await
        }
    }
}
