//! # API Error Type
//!
//! Unified error type for command functions. Every failure a user can see
//! becomes an `ApiError` carrying the notice to show.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in CardCalc                               │
//! │                                                                         │
//! │  Command Function  ──►  Result<T, ApiError>                            │
//! │         │                                                               │
//! │         ├── CoreError::EmptySession ──► EMPTY_ITEMS                    │
//! │         │     "Empty Items" / "Please add quantities before saving."   │
//! │         │                                                               │
//! │         ├── StoreError::* ────────────► STORAGE_ERROR (detail logged)  │
//! │         │     "Error" / "Could not save the session."                  │
//! │         │                                                               │
//! │         ├── StoreError::Internal ─────► INTERNAL (detail logged)       │
//! │         │                                                               │
//! │         ├── ValidationError ──────────► VALIDATION_ERROR               │
//! │         │                                                               │
//! │         └── ExportError ──────────────► PERMISSION_DENIED              │
//! │                                         EXPORT_FAILED                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! A host receives:
//! ```json
//! {
//!   "code": "EMPTY_ITEMS",
//!   "title": "Empty Items",
//!   "message": "Please add quantities before saving."
//! }
//! ```

use serde::Serialize;

use cardcalc_core::{CoreError, ValidationError};
use cardcalc_store::StoreError;

/// Title used for generic failure notices.
const ERROR_TITLE: &str = "Error";

/// API error returned from commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Notice title
    pub title: String,

    /// Human-readable message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Confirm attempted with no countable quantity
    EmptyItems,

    /// Persisting failed
    StorageError,

    /// Input validation failed
    ValidationError,

    /// Session not found
    NotFound,

    /// Photo library access was not granted
    PermissionDenied,

    /// Receipt image could not be saved
    ExportFailed,

    /// Unexpected failure below the store API
    Internal,
}

/// Result type for command functions.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(code: ErrorCode, title: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError {
            code,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Nothing countable to save.
    pub fn empty_items() -> Self {
        ApiError::new(
            ErrorCode::EmptyItems,
            "Empty Items",
            "Please add quantities before saving.",
        )
    }

    /// A session could not be written.
    pub fn session_not_saved() -> Self {
        ApiError::new(
            ErrorCode::StorageError,
            ERROR_TITLE,
            "Could not save the session.",
        )
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            ERROR_TITLE,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, "Invalid input", message)
    }

    pub fn permission_denied() -> Self {
        ApiError::new(
            ErrorCode::PermissionDenied,
            "Permission required",
            "We need permission to save photos to your device.",
        )
    }

    pub fn export_failed() -> Self {
        ApiError::new(
            ErrorCode::ExportFailed,
            ERROR_TITLE,
            "Could not save the receipt image.",
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, ERROR_TITLE, message)
    }
}

/// Store failures surface as a generic storage notice; the detail is only
/// logged.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Storage operation failed");
        match err {
            StoreError::ConnectionFailed(_) | StoreError::MigrationFailed(_) => ApiError::new(
                ErrorCode::StorageError,
                ERROR_TITLE,
                "Could not open saved data.",
            ),
            StoreError::Serialization { .. } => ApiError::new(
                ErrorCode::StorageError,
                ERROR_TITLE,
                "Saved data could not be read.",
            ),
            StoreError::QueryFailed(_) | StoreError::PoolExhausted => ApiError::new(
                ErrorCode::StorageError,
                ERROR_TITLE,
                "Could not access saved data.",
            ),
            StoreError::Internal(_) => ApiError::internal("Something went wrong."),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptySession => ApiError::empty_items(),
            CoreError::PriceNotFound {
                network,
                denomination,
            } => ApiError::not_found("Price", format!("{} {}", network, denomination)),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
