//! # History Repository
//!
//! The confirmed sessions, stored as one JSON array under
//! `"sessionsHistory"`.
//!
//! Mutations read the whole list, change it, and write the whole list back.
//! They read strictly: if the stored list can't be decoded the mutation
//! fails instead of overwriting it.

use tracing::{debug, info, warn};

use cardcalc_core::{Session, SessionId};

use crate::error::{StoreError, StoreResult};
use crate::kv::SharedStore;
use crate::HISTORY_KEY;

/// Repository for confirmed sessions.
///
/// ## Usage
/// ```rust,ignore
/// let repo = HistoryRepository::new(store);
///
/// repo.append(&session).await?;
/// let newest_first = repo.list_sessions().await;
/// let removed = repo.delete_session(session.id()).await?;
/// ```
#[derive(Clone)]
pub struct HistoryRepository {
    store: SharedStore,
}

impl HistoryRepository {
    pub fn new(store: SharedStore) -> Self {
        HistoryRepository { store }
    }

    /// Reads the stored list in storage order.
    ///
    /// ## Returns
    /// * `Ok(vec![])` - Nothing stored yet
    /// * `Err(StoreError)` - Read failed or the stored value is corrupt
    pub async fn load_all(&self) -> StoreResult<Vec<Session>> {
        let Some(json) = self.store.get(HISTORY_KEY).await? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&json).map_err(|e| StoreError::serialization(HISTORY_KEY, e))
    }

    /// Replaces the stored list.
    pub async fn save_all(&self, sessions: &[Session]) -> StoreResult<()> {
        let json =
            serde_json::to_string(sessions).map_err(|e| StoreError::serialization(HISTORY_KEY, e))?;
        self.store.set(HISTORY_KEY, &json).await
    }

    /// Appends one session to the end of the stored list.
    pub async fn append(&self, session: &Session) -> StoreResult<()> {
        let mut sessions = self.load_all().await?;
        sessions.push(session.clone());
        self.save_all(&sessions).await?;

        info!(
            session_id = session.id(),
            items = session.item_count(),
            total = session.overall_total(),
            "Session saved"
        );
        Ok(())
    }

    /// All sessions, newest id first.
    ///
    /// Never fails: a read or decode error is logged and yields an empty
    /// list.
    pub async fn list_sessions(&self) -> Vec<Session> {
        let mut sessions = match self.load_all().await {
            Ok(sessions) => sessions,
            Err(e) => {
                warn!(error = %e, "Could not read session history");
                return Vec::new();
            }
        };

        sessions.sort_by(|a, b| b.id().cmp(&a.id()));
        debug!(count = sessions.len(), "Listed sessions");
        sessions
    }

    /// Looks up one session by id.
    pub async fn find(&self, id: SessionId) -> Option<Session> {
        match self.load_all().await {
            Ok(sessions) => sessions.into_iter().find(|s| s.id() == id),
            Err(e) => {
                warn!(error = %e, session_id = id, "Could not read session history");
                None
            }
        }
    }

    /// Largest stored id, 0 when history is empty or unreadable.
    pub async fn max_id(&self) -> SessionId {
        self.list_sessions()
            .await
            .first()
            .map(Session::id)
            .unwrap_or(0)
    }

    /// Removes the session with `id`, keeping the others in order.
    ///
    /// ## Returns
    /// * `Ok(true)` - Removed and the list rewritten
    /// * `Ok(false)` - No such id; nothing written
    pub async fn delete_session(&self, id: SessionId) -> StoreResult<bool> {
        let mut sessions = self.load_all().await?;
        let before = sessions.len();
        sessions.retain(|s| s.id() != id);

        if sessions.len() == before {
            debug!(session_id = id, "Delete requested for unknown session");
            return Ok(false);
        }

        self.save_all(&sessions).await?;
        info!(session_id = id, remaining = sessions.len(), "Session deleted");
        Ok(true)
    }
}

impl std::fmt::Debug for HistoryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryRepository").finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::kv::{KeyValueStore, MemoryStore};
    use crate::pool::{DbConfig, SqliteStore};
    use crate::repository::testing::FlakyStore;
    use cardcalc_core::{Denomination, Network, SessionItem};

    fn session(id: SessionId, quantity: &str) -> Session {
        Session::new(
            id,
            Utc.timestamp_millis_opt(id).unwrap(),
            vec![SessionItem::new(
                Network::Mtn,
                Denomination::new(100),
                quantity,
                98,
            )],
        )
    }

    fn ids(sessions: &[Session]) -> Vec<SessionId> {
        sessions.iter().map(Session::id).collect()
    }

    #[tokio::test]
    async fn test_empty_history() {
        let repo = HistoryRepository::new(Arc::new(MemoryStore::new()));

        assert!(repo.load_all().await.unwrap().is_empty());
        assert!(repo.list_sessions().await.is_empty());
        assert_eq!(repo.max_id().await, 0);
    }

    #[tokio::test]
    async fn test_append_keeps_storage_order() {
        let repo = HistoryRepository::new(Arc::new(MemoryStore::new()));

        repo.append(&session(10, "1")).await.unwrap();
        repo.append(&session(30, "2")).await.unwrap();
        repo.append(&session(20, "3")).await.unwrap();

        assert_eq!(ids(&repo.load_all().await.unwrap()), vec![10, 30, 20]);
    }

    #[tokio::test]
    async fn test_list_sorts_newest_first() {
        let repo = HistoryRepository::new(Arc::new(MemoryStore::new()));
        repo.save_all(&[session(10, "1"), session(30, "1"), session(20, "1")])
            .await
            .unwrap();

        assert_eq!(ids(&repo.list_sessions().await), vec![30, 20, 10]);
        assert_eq!(repo.max_id().await, 30);
    }

    #[tokio::test]
    async fn test_delete_present_id() {
        let repo = HistoryRepository::new(Arc::new(MemoryStore::new()));
        repo.save_all(&[session(1, "1"), session(2, "1"), session(3, "1")])
            .await
            .unwrap();

        assert!(repo.delete_session(2).await.unwrap());

        assert_eq!(ids(&repo.load_all().await.unwrap()), vec![1, 3]);
        assert!(repo.find(2).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_id_does_not_write() {
        let store = Arc::new(FlakyStore {
            inner: MemoryStore::with_entries([(
                HISTORY_KEY,
                serde_json::to_string(&[session(1, "1")]).unwrap(),
            )]),
            fail_writes: true,
            ..Default::default()
        });
        let repo = HistoryRepository::new(store);

        assert!(!repo.delete_session(99).await.unwrap());
        assert_eq!(ids(&repo.load_all().await.unwrap()), vec![1]);
    }

    #[tokio::test]
    async fn test_corrupt_history() {
        let store = Arc::new(MemoryStore::with_entries([(HISTORY_KEY, "[{")]));
        let repo = HistoryRepository::new(store.clone());

        assert!(repo.list_sessions().await.is_empty());
        assert!(repo.find(1).await.is_none());
        assert!(matches!(
            repo.append(&session(1, "1")).await,
            Err(StoreError::Serialization { .. })
        ));

        // The corrupt value is left for inspection.
        assert_eq!(store.get(HISTORY_KEY).await.unwrap().as_deref(), Some("[{"));
    }

    #[tokio::test]
    async fn test_find_returns_stored_session() {
        let repo = HistoryRepository::new(Arc::new(MemoryStore::new()));
        let saved = session(7, "1 1/2");
        repo.append(&saved).await.unwrap();

        let found = repo.find(7).await.unwrap();

        assert_eq!(found, saved);
        assert_eq!(found.overall_total(), 147.0);
    }

    #[tokio::test]
    async fn test_round_trip_through_sqlite() {
        let store = SqliteStore::new(DbConfig::in_memory()).await.unwrap();
        let repo = store.history();

        repo.append(&session(1_700_000_000_000, "2")).await.unwrap();
        repo.append(&session(1_700_000_000_001, "1/2")).await.unwrap();

        let listed = repo.list_sessions().await;
        assert_eq!(ids(&listed), vec![1_700_000_000_001, 1_700_000_000_000]);
        assert_eq!(listed[0].overall_total(), 49.0);
    }
}
