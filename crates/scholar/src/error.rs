//! Error types for the scholar library.

use thiserror::Error;

use crate::entity::EntityKind;

/// Main error type for resolution and derivation operations.
#[derive(Debug, Error)]
pub enum ScholarError {
    /// The id does not start with a known entity prefix.
    #[error("Unknown entity kind for id '{0}'")]
    UnknownKind(String),

    /// The id parsed, but belongs to a different kind than requested.
    #[error("Id '{id}' is not a {expected} id")]
    KindMismatch { expected: EntityKind, id: String },

    /// Neither the local index nor the remote catalog produced a record.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    /// The remote catalog failed for infrastructure reasons (network, timeout, 5xx).
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Malformed request parameters (page numbers, page sizes).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requested page is past the last page.
    #[error("Page {page} out of range ({total_pages} pages)")]
    PageOutOfRange { page: usize, total_pages: usize },

    /// The operation was cancelled by the caller.
    #[error("Operation cancelled")]
    Cancelled,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reading or writing a store.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScholarError {
    /// Whether a caller may reasonably retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScholarError::UpstreamUnavailable(_))
    }
}

/// Result type alias for scholar operations.
pub type Result<T> = std::result::Result<T, ScholarError>;
