//! Unified error type definition

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by the remote persistence API.
///
/// Every variant is recovered locally by the editor: the field reverts, or the
/// removal returns to idle, and the user is notified. None of them is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// Connection refused, DNS failure, dropped response, etc.
    #[error("Network error: {detail}")]
    Network { detail: String },

    /// The server rejected the submitted value.
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    /// The caller lacks permission for the operation.
    #[error("Permission denied: {detail}")]
    Unauthorized { detail: String },

    /// The record no longer exists remotely.
    #[error("Record not found: {detail}")]
    NotFound { detail: String },

    /// The value collides with another record (e.g. a taken slug).
    #[error("Conflict on '{field}': {message}")]
    Conflict { field: String, message: String },

    /// Any other server-side failure.
    #[error("Server error: {detail}")]
    Server { detail: String },
}

impl ApiError {
    /// Whether the failure was caused by user input rather than the system.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::Conflict { .. } | Self::Unauthorized { .. }
        )
    }
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Editor cannot be constructed (incomplete record key, broken schema or routes)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Operation referenced a field id the record does not have
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// Removal lifecycle step requested from the wrong state
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, rejected value, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidTransition(_) => true,
            Self::Configuration(_)
            | Self::FieldNotFound(_)
            | Self::StorageError(_)
            | Self::SerializationError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
