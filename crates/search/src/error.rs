//! Errors raised by the full-text engine

use thiserror::Error;

/// Failure of a full-text engine operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine has been closed
    #[error("engine is closed")]
    Closed,

    /// Indexing a new key would exceed the configured document limit
    #[error("document limit of {limit} reached")]
    CapacityExceeded {
        /// Configured maximum number of documents
        limit: usize,
    },

    /// Write rejected by the engine for another reason
    #[error("write rejected: {0}")]
    Rejected(String),
}
