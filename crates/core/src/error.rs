//! Error types for the text indexer
//!
//! Every indexer backend maps its own failures onto this taxonomy.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::LinkId;
use thiserror::Error;

/// Boxed error raised by a full-text engine or storage medium
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for indexer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for indexer operations
#[derive(Debug, Error)]
pub enum Error {
    /// The document passed to `index` carries the nil link ID
    #[error("document does not provide a valid link ID")]
    MissingKey,

    /// No document is stored under the requested link ID
    #[error("document {0} not found")]
    NotFound(LinkId),

    /// The underlying engine or storage failed an operation
    #[error("{op} {key}: backend failure: {source}")]
    Backend {
        /// Operation that failed (e.g. "index", "search")
        op: &'static str,
        /// Document key or query expression involved
        key: String,
        /// Error reported by the backend
        #[source]
        source: BackendError,
    },

    /// The engine and the authoritative store disagree
    ///
    /// Never expected at runtime; indicates a synchronisation bug.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Configuration could not be loaded or failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Wrap a backend error with the operation and key it occurred on
    pub fn backend<E>(op: &'static str, key: impl Into<String>, source: E) -> Self
    where
        E: Into<BackendError>,
    {
        Error::Backend {
            op,
            key: key.into(),
            source: source.into(),
        }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a missing-key error
    pub fn is_missing_key(&self) -> bool {
        matches!(self, Error::MissingKey)
    }

    /// Check if this is a backend failure
    pub fn is_backend(&self) -> bool {
        matches!(self, Error::Backend { .. })
    }
}
