//! Capability surface of an embedded full-text engine
//!
//! The engine stores only a projection of each document (title, content
//! and rank) keyed by an opaque string. It matches and ranks but cannot
//! reconstruct the original document; callers resolve hit keys elsewhere.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Fields written into the engine for one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedFields {
    /// Title text
    pub title: String,
    /// Body text
    pub content: String,
    /// Externally computed rank; primary sort key
    pub page_rank: f64,
}

impl IndexedFields {
    /// Create a projection
    pub fn new(title: impl Into<String>, content: impl Into<String>, page_rank: f64) -> Self {
        IndexedFields {
            title: title.into(),
            content: content.into(),
            page_rank,
        }
    }
}

/// How query terms must occur in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// At least one term, in any order
    #[default]
    Terms,
    /// All terms adjacent and in order
    Phrase,
}

/// A bounded page request against the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineQuery {
    /// Raw search expression
    pub expression: String,
    /// Matching mode
    pub mode: MatchMode,
    /// Number of sorted hits to skip
    pub from: usize,
    /// Maximum hits to return
    pub size: usize,
}

impl EngineQuery {
    /// Create a request for the first `size` hits
    pub fn new(expression: impl Into<String>, mode: MatchMode, size: usize) -> Self {
        EngineQuery {
            expression: expression.into(),
            mode,
            from: 0,
            size,
        }
    }

    /// Builder: set starting offset
    pub fn with_from(mut self, from: usize) -> Self {
        self.from = from;
        self
    }
}

/// One matching document
#[derive(Debug, Clone, PartialEq)]
pub struct EngineHit {
    /// Key the document was indexed under
    pub key: String,
    /// Rank stored with the projection
    pub page_rank: f64,
    /// Textual relevance
    pub relevance: f32,
}

/// One page of hits
///
/// Hits are sorted by `page_rank` descending, then `relevance` descending,
/// then key ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineResults {
    /// Number of matching documents across all pages
    pub total: u64,
    /// Hits in this page
    pub hits: Vec<EngineHit>,
}

/// Objects that can store projections and answer ranked queries
///
/// `search` must be safe to call concurrently with other searches and with
/// writes.
pub trait TextEngine: Send + Sync {
    /// Insert or replace the projection stored under `key`
    fn index(&self, key: &str, fields: IndexedFields) -> Result<(), EngineError>;

    /// Run a query and return the requested page
    fn search(&self, query: &EngineQuery) -> Result<EngineResults, EngineError>;

    /// Release resources; later operations fail with [`EngineError::Closed`]
    fn close(&self) -> Result<(), EngineError>;
}
