//! # Receipt Export
//!
//! Saving a receipt image to the device photo library. Capturing the image
//! and talking to the library belong to the host, behind
//! [`ReceiptExporter`].
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  export_receipt(exporter, session)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  request_permission() ── not Granted ──► PERMISSION_DENIED             │
//! │       │                                   (nothing saved)              │
//! │       ▼                                                                 │
//! │  save_image(receipt) ─── Err ──────────► EXPORT_FAILED                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  { uri, notice: "Receipt image saved to your photos." }                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use cardcalc_core::{Receipt, Session};

use crate::commands::Notice;
use crate::error::{ApiError, ApiResult};

/// Photo library permission as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// Host-side export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Rendering the receipt view to an image failed.
    #[error("Capture failed: {0}")]
    Capture(String),

    /// Writing the image to the library failed.
    #[error("Save failed: {0}")]
    Save(String),
}

/// Host implementation of image capture and photo library access.
#[async_trait]
pub trait ReceiptExporter: Send + Sync {
    /// Asks for (or reports) photo library access.
    async fn request_permission(&self) -> PermissionStatus;

    /// Renders the receipt and saves it. Returns the saved asset URI.
    async fn save_image(&self, receipt: &Receipt) -> Result<String, ExportError>;
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub uri: String,
    pub notice: Notice,
}

/// Saves the receipt of `session` as an image.
///
/// ## Errors
/// - `PERMISSION_DENIED` when library access is not granted
/// - `EXPORT_FAILED` when the host could not save the image
pub async fn export_receipt(
    exporter: &dyn ReceiptExporter,
    session: &Session,
) -> ApiResult<ExportResponse> {
    debug!(session_id = session.id(), "export_receipt command");

    let status = exporter.request_permission().await;
    if status != PermissionStatus::Granted {
        warn!(?status, "Photo library permission not granted");
        return Err(ApiError::permission_denied());
    }

    let receipt = Receipt::from(session);
    let uri = exporter.save_image(&receipt).await.map_err(|e| {
        error!(error = %e, session_id = session.id(), "Failed to save receipt");
        ApiError::export_failed()
    })?;

    info!(session_id = session.id(), uri = %uri, "Receipt image saved");
    Ok(ExportResponse {
        uri,
        notice: Notice::new("Success!", "Receipt image saved to your photos."),
    })
}
