//! # History State
//!
//! The session manager: turns the draft ledger into a confirmed session and
//! manages the saved history.
//!
//! ## Confirm Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  confirm(ledger, catalog)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. floor = largest stored id                                          │
//! │  2. id    = max(now ms, last + 1, floor + 1)                           │
//! │  3. Session::from_ledger ── nothing countable ──► EMPTY_ITEMS          │
//! │       │                                            (nothing changes)   │
//! │       ▼                                                                 │
//! │  4. history.append(session) ── write failed ───► STORAGE_ERROR         │
//! │       │                                            (ledger kept)       │
//! │       ▼                                                                 │
//! │  5. clear the cells saved in step 3 (later edits stay)                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use tracing::{error, info};

use cardcalc_core::{Session, SessionId, SessionIdGenerator};
use cardcalc_store::HistoryRepository;

use crate::error::{ApiError, ApiResult};
use crate::state::{CatalogState, LedgerState};

/// Session manager state.
#[derive(Debug)]
pub struct HistoryState {
    repo: HistoryRepository,
    ids: Mutex<SessionIdGenerator>,
}

impl HistoryState {
    pub fn new(repo: HistoryRepository) -> Self {
        HistoryState {
            repo,
            ids: Mutex::new(SessionIdGenerator::new()),
        }
    }

    /// Freezes the ledger into a new session, saves it, then clears the
    /// cells that were frozen. Cells typed while the save was running are
    /// kept.
    ///
    /// ## Errors
    /// - `EMPTY_ITEMS` when nothing in the ledger is countable
    /// - `STORAGE_ERROR` when the history could not be written; the ledger
    ///   is left as it was
    pub async fn confirm(
        &self,
        ledger: &LedgerState,
        catalog: &CatalogState,
    ) -> ApiResult<Session> {
        let prices = catalog.snapshot();
        if !ledger.with_ledger(|l| l.has_countable_entries()) {
            return Err(ApiError::empty_items());
        }

        let floor = self.repo.max_id().await;
        let now = Utc::now();
        let id = self
            .ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_id(now, floor);

        let (session, frozen) = ledger.with_ledger(|l| {
            Session::from_ledger(id, now, l, &prices).map(|session| (session, l.clone()))
        })?;

        if let Err(e) = self.repo.append(&session).await {
            error!(error = %e, session_id = id, "Could not save session");
            return Err(ApiError::session_not_saved());
        }

        ledger.with_ledger_mut(|l| l.clear_unchanged(&frozen));

        info!(
            session_id = id,
            items = session.item_count(),
            total = session.overall_total(),
            "Session confirmed"
        );
        Ok(session)
    }

    /// Saved sessions, newest first. Unreadable history lists as empty.
    pub async fn list_sessions(&self) -> Vec<Session> {
        self.repo.list_sessions().await
    }

    /// One saved session.
    pub async fn find_session(&self, id: SessionId) -> ApiResult<Session> {
        self.repo
            .find(id)
            .await
            .ok_or_else(|| ApiError::not_found("Session", id))
    }

    /// Deletes a saved session. Returns false when no session had that id.
    pub async fn delete_session(&self, id: SessionId) -> ApiResult<bool> {
        Ok(self.repo.delete_session(id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::error::ErrorCode;
    use cardcalc_core::{Denomination, Network};
    use cardcalc_store::{
        CatalogRepository, KeyValueStore, MemoryStore, SharedStore, StoreError, StoreResult,
        HISTORY_KEY,
    };

    /// Reads work; writes to the history key fail.
    #[derive(Default)]
    struct ReadOnlyHistory {
        inner: MemoryStore,
    }

    #[async_trait]
    impl KeyValueStore for ReadOnlyHistory {
        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            if key == HISTORY_KEY {
                return Err(StoreError::QueryFailed("read-only".to_string()));
            }
            self.inner.set(key, value).await
        }
    }

    async fn fixture(store: SharedStore) -> (HistoryState, LedgerState, CatalogState) {
        let catalog = CatalogState::load(CatalogRepository::new(store.clone())).await;
        (
            HistoryState::new(HistoryRepository::new(store)),
            LedgerState::new(),
            catalog,
        )
    }

    fn d(value: u32) -> Denomination {
        Denomination::new(value)
    }

    #[tokio::test]
    async fn test_confirm_empty_ledger() {
        let (history, ledger, catalog) = fixture(Arc::new(MemoryStore::new())).await;
        ledger.with_ledger_mut(|l| {
            l.set_quantity(Network::Mtn, d(100), "0");
            l.set_quantity(Network::Glo, d(200), "");
            l.set_quantity(Network::Airtel, d(500), "abc");
        });

        let err = history.confirm(&ledger, &catalog).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyItems);
        assert!(history.list_sessions().await.is_empty());
        assert_eq!(ledger.with_ledger(|l| l.len()), 3);
    }

    #[tokio::test]
    async fn test_confirm_appends_and_clears() {
        let (history, ledger, catalog) = fixture(Arc::new(MemoryStore::new())).await;
        ledger.with_ledger_mut(|l| {
            l.set_quantity(Network::Mtn, d(100), "1 1/2");
            l.set_quantity(Network::Glo, d(500), "2");
            l.set_quantity(Network::Airtel, d(200), "0");
        });
        let expected_total = ledger.with_ledger(|l| l.overall_total(&catalog.snapshot()));

        let session = history.confirm(&ledger, &catalog).await.unwrap();

        assert_eq!(session.overall_total(), expected_total);
        assert_eq!(session.item_count(), 2);
        assert!(ledger.with_ledger(|l| l.is_empty()));

        let listed = history.list_sessions().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], session);
    }

    #[tokio::test]
    async fn test_confirm_then_list_shows_newest_first() {
        let (history, ledger, catalog) = fixture(Arc::new(MemoryStore::new())).await;

        ledger.with_ledger_mut(|l| l.set_quantity(Network::Mtn, d(100), "1"));
        let first = history.confirm(&ledger, &catalog).await.unwrap();
        ledger.with_ledger_mut(|l| l.set_quantity(Network::Mtn, d(100), "2"));
        let second = history.confirm(&ledger, &catalog).await.unwrap();

        assert!(second.id() > first.id());
        let listed = history.list_sessions().await;
        assert_eq!(listed[0].id(), second.id());
        assert_eq!(listed[1].id(), first.id());
    }

    #[tokio::test]
    async fn test_confirm_write_failure_keeps_ledger() {
        let (history, ledger, catalog) = fixture(Arc::new(ReadOnlyHistory::default())).await;
        ledger.with_ledger_mut(|l| l.set_quantity(Network::Glo, d(1000), "3"));

        let err = history.confirm(&ledger, &catalog).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.message, "Could not save the session.");
        assert_eq!(
            ledger.with_ledger(|l| l.quantity(Network::Glo, d(1000)).map(String::from)),
            Some("3".to_string())
        );
    }

    /// Holds history writes until released; `waiting` fires once a write
    /// is blocked.
    struct GatedHistory {
        inner: MemoryStore,
        waiting: tokio::sync::Notify,
        gate: tokio::sync::Semaphore,
    }

    #[async_trait]
    impl KeyValueStore for GatedHistory {
        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            if key == HISTORY_KEY {
                self.waiting.notify_one();
                let _permit = self
                    .gate
                    .acquire()
                    .await
                    .map_err(|e| StoreError::Internal(e.to_string()))?;
            }
            self.inner.set(key, value).await
        }
    }

    #[tokio::test]
    async fn test_confirm_keeps_cells_typed_during_save() {
        let store = Arc::new(GatedHistory {
            inner: MemoryStore::new(),
            waiting: tokio::sync::Notify::new(),
            gate: tokio::sync::Semaphore::new(0),
        });
        let (history, ledger, catalog) = fixture(store.clone()).await;
        ledger.with_ledger_mut(|l| {
            l.set_quantity(Network::Mtn, d(100), "2");
            l.set_quantity(Network::Glo, d(200), "1");
        });

        let typing = async {
            store.waiting.notified().await;
            ledger.with_ledger_mut(|l| {
                l.set_quantity(Network::Glo, d(200), "5");
                l.set_quantity(Network::Airtel, d(500), "3");
            });
            store.gate.add_permits(1);
        };
        let (confirmed, ()) = tokio::join!(history.confirm(&ledger, &catalog), typing);

        let session = confirmed.unwrap();
        assert_eq!(session.item_count(), 2);
        assert_eq!(ledger.with_ledger(|l| l.len()), 2);
        assert!(ledger.with_ledger(|l| l.quantity(Network::Mtn, d(100)).is_none()));
        assert_eq!(
            ledger.with_ledger(|l| l.quantity(Network::Glo, d(200)).map(String::from)),
            Some("5".to_string())
        );
        assert_eq!(
            ledger.with_ledger(|l| l.quantity(Network::Airtel, d(500)).map(String::from)),
            Some("3".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_and_find() {
        let (history, ledger, catalog) = fixture(Arc::new(MemoryStore::new())).await;
        ledger.with_ledger_mut(|l| l.set_quantity(Network::Mtn, d(100), "1"));
        let session = history.confirm(&ledger, &catalog).await.unwrap();

        assert_eq!(history.find_session(session.id()).await.unwrap(), session);
        assert!(!history.delete_session(session.id() + 1).await.unwrap());
        assert!(history.delete_session(session.id()).await.unwrap());

        let err = history.find_session(session.id()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(history
            .list_sessions()
            .await
            .iter()
            .all(|s| s.id() != session.id()));
    }
}
