//! # Key-Value Store
//!
//! The persistence seam. Everything CardCalc saves is a UTF-8 string under
//! a string key; repositories encode and decode the JSON on top.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Arc<dyn KeyValueStore>                                                │
//! │       │                                                                 │
//! │       ├── MemoryStore   HashMap behind a tokio RwLock (tests, seeds)   │
//! │       │                                                                 │
//! │       └── SqliteStore   kv_entries table (see pool.rs)                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes replace the whole value. There is no partial update and no
//! transaction spanning two keys.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreResult;

/// String-keyed durable storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value under `key`. A missing key is `Ok(None)`.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Shared handle used by repositories.
pub type SharedStore = Arc<dyn KeyValueStore>;

// =============================================================================
// Memory Store
// =============================================================================

/// Volatile store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store pre-populated with `(key, value)` pairs.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        MemoryStore {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("prices").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let store = MemoryStore::with_entries([("prices", "{}")]);

        store.set("prices", r#"{"MTN":{"100":90}}"#).await.unwrap();

        assert_eq!(
            store.get("prices").await.unwrap().as_deref(),
            Some(r#"{"MTN":{"100":90}}"#)
        );
    }
}
