//! # Session Commands
//!
//! Confirming, browsing and deleting sessions, and the receipt view.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐  preview_receipt  ┌──────────┐  confirm_session           │
//! │  │  Ledger  │──────────────────►│ Preview  │──────────────┐             │
//! │  └──────────┘                   └──────────┘              ▼             │
//! │       ▲                                            ┌────────────┐      │
//! │       │ (cleared after a successful save)          │  History   │      │
//! │       └────────────────────────────────────────────│            │      │
//! │                                                     └────────────┘      │
//! │                                     list_sessions / get_receipt │      │
//! │                                     delete_session              ▼      │
//! │                                                          ┌──────────┐  │
//! │                                                          │ Receipt  │  │
//! │                                                          └──────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use cardcalc_core::{Receipt, Session, SessionId};

use crate::error::ApiResult;
use crate::state::{CatalogState, ConfigState, HistoryState, LedgerState};

/// Id shown on a receipt that has not been saved yet.
const PREVIEW_SESSION_ID: SessionId = 0;

/// One history list row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: SessionId,
    pub date: DateTime<Utc>,
    pub item_count: usize,
    pub overall_total: f64,
    pub display_total: String,
}

impl SessionSummary {
    fn new(session: &Session, config: &ConfigState) -> Self {
        SessionSummary {
            id: session.id(),
            date: session.date(),
            item_count: session.item_count(),
            overall_total: session.overall_total(),
            display_total: config.format_currency(session.overall_total()),
        }
    }
}

/// Receipt plus the strings a host shows or shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub receipt: Receipt,
    pub display_date: String,
    pub display_total: String,
    /// Monospace rendering for text sharing.
    pub text: String,
}

impl ReceiptResponse {
    fn new(session: &Session, config: &ConfigState) -> Self {
        let receipt = Receipt::from(session);
        ReceiptResponse {
            display_date: receipt.display_date(),
            display_total: receipt.display_total(&config.currency_symbol),
            text: receipt.render_text(&config.currency_symbol, config.receipt_width),
            receipt,
        }
    }
}

/// Saves the current ledger as a session and clears the ledger.
///
/// ## Errors
/// - `EMPTY_ITEMS` when nothing is countable
/// - `STORAGE_ERROR` when the session could not be written
pub async fn confirm_session(
    history: &HistoryState,
    ledger: &LedgerState,
    catalog: &CatalogState,
) -> ApiResult<Session> {
    debug!("confirm_session command");
    history.confirm(ledger, catalog).await
}

/// Receipt for the current ledger, without saving anything.
///
/// ## Errors
/// `EMPTY_ITEMS` when nothing is countable.
pub fn preview_receipt(
    ledger: &LedgerState,
    catalog: &CatalogState,
    config: &ConfigState,
) -> ApiResult<ReceiptResponse> {
    debug!("preview_receipt command");
    let prices = catalog.snapshot();
    let session =
        ledger.with_ledger(|l| Session::from_ledger(PREVIEW_SESSION_ID, Utc::now(), l, &prices))?;
    Ok(ReceiptResponse::new(&session, config))
}

/// History list, newest first.
pub async fn list_sessions(history: &HistoryState, config: &ConfigState) -> Vec<SessionSummary> {
    debug!("list_sessions command");
    history
        .list_sessions()
        .await
        .iter()
        .map(|s| SessionSummary::new(s, config))
        .collect()
}

/// Full session by id.
pub async fn get_session(history: &HistoryState, id: SessionId) -> ApiResult<Session> {
    debug!(session_id = id, "get_session command");
    history.find_session(id).await
}

/// Receipt for a saved session.
pub async fn get_receipt(
    history: &HistoryState,
    config: &ConfigState,
    id: SessionId,
) -> ApiResult<ReceiptResponse> {
    debug!(session_id = id, "get_receipt command");
    let session = history.find_session(id).await?;
    Ok(ReceiptResponse::new(&session, config))
}

/// Deletes a saved session. Deleting an unknown id is a no-op that
/// returns false.
pub async fn delete_session(history: &HistoryState, id: SessionId) -> ApiResult<bool> {
    debug!(session_id = id, "delete_session command");
    history.delete_session(id).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ErrorCode;
    use cardcalc_core::{Denomination, Network};
    use cardcalc_store::{CatalogRepository, HistoryRepository, MemoryStore, SharedStore};

    struct Fixture {
        history: HistoryState,
        ledger: LedgerState,
        catalog: CatalogState,
        config: ConfigState,
    }

    async fn fixture() -> Fixture {
        let store: SharedStore = Arc::new(MemoryStore::new());
        Fixture {
            catalog: CatalogState::load(CatalogRepository::new(store.clone())).await,
            history: HistoryState::new(HistoryRepository::new(store)),
            ledger: LedgerState::new(),
            config: ConfigState::default(),
        }
    }

    fn fill(ledger: &LedgerState) {
        ledger.with_ledger_mut(|l| {
            l.set_quantity(Network::Mtn, Denomination::new(100), "1 1/2");
            l.set_quantity(Network::Glo, Denomination::new(500), "2");
        });
    }

    #[tokio::test]
    async fn test_preview_does_not_save() {
        let f = fixture().await;
        fill(&f.ledger);

        let preview = preview_receipt(&f.ledger, &f.catalog, &f.config).unwrap();

        assert_eq!(preview.receipt.lines.len(), 2);
        assert_eq!(preview.display_total, "₦1,097");
        assert!(list_sessions(&f.history, &f.config).await.is_empty());
        assert_eq!(f.ledger.with_ledger(|l| l.len()), 2);
    }

    #[tokio::test]
    async fn test_preview_empty_ledger() {
        let f = fixture().await;
        let err = preview_receipt(&f.ledger, &f.catalog, &f.config).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyItems);
    }

    #[tokio::test]
    async fn test_confirm_list_receipt_delete() {
        let f = fixture().await;
        fill(&f.ledger);

        let session = confirm_session(&f.history, &f.ledger, &f.catalog)
            .await
            .unwrap();

        let listed = list_sessions(&f.history, &f.config).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, session.id());
        assert_eq!(listed[0].item_count, 2);
        assert_eq!(listed[0].display_total, "₦1,097");

        let receipt = get_receipt(&f.history, &f.config, session.id()).await.unwrap();
        assert_eq!(receipt.receipt.session_id, session.id());
        assert_eq!(receipt.receipt.lines[0].label, "MTN 100");
        assert!(receipt.text.contains("Overall Total"));

        assert_eq!(get_session(&f.history, session.id()).await.unwrap(), session);

        assert!(delete_session(&f.history, session.id()).await.unwrap());
        assert!(!delete_session(&f.history, session.id()).await.unwrap());
        assert!(list_sessions(&f.history, &f.config).await.is_empty());

        let err = get_receipt(&f.history, &f.config, session.id())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
