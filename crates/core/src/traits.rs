//! Capability contracts for indexer backends
//!
//! This module defines the two traits every backend implements:
//! - Indexer: insert, look up, score and search documents
//! - SearchIterator: page-buffered cursor over search results
//!
//! Backends are interchangeable variants of these traits. Each one owns its
//! concurrency strategy but must uphold the same guarantees:
//!
//! - Re-indexing a document never clobbers its stored `page_rank`
//! - `update_score` on an unknown link creates a placeholder document
//! - No observer sees a full-text projection and a stored document that
//!   disagree in a way inconsistent with some serial order of calls
//! - Backend errors are mapped onto [`Error`](crate::Error) rather than leaking
//!   transport-specific shapes

use crate::document::Document;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::types::LinkId;

/// Objects that can index and search crawled documents
///
/// All methods are safe for concurrent invocation from multiple threads.
pub trait Indexer: Send + Sync {
    /// Insert a new document or update the entry for an existing one
    ///
    /// Stamps `indexed_at` on `doc`. If a document with the same link ID is
    /// already stored, the incoming `page_rank` is ignored and the stored
    /// score is kept.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingKey`] if `doc.link_id` is nil
    /// - [`Error::Backend`] if the engine rejects the write; prior state for
    ///   the key is left intact
    fn index(&self, doc: &mut Document) -> Result<()>;

    /// Look up a document by its link ID
    ///
    /// Returns an independent copy of the stored document.
    fn find_by_id(&self, link_id: LinkId) -> Result<Document>;

    /// Search the index and return a result iterator
    ///
    /// Construction failures surface here; iteration failures surface via
    /// [`SearchIterator::error`].
    fn search(&self, query: &Query) -> Result<Box<dyn SearchIterator>>;

    /// Update the score of a document
    ///
    /// If no such document exists, a placeholder with the provided score and
    /// empty text fields is created.
    fn update_score(&self, link_id: LinkId, score: f64) -> Result<()>;
}

/// Lifecycle of a result iterator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorState {
    /// Buffered page may have unread entries
    Ready,
    /// No more results
    Exhausted,
    /// A page fetch failed; see [`SearchIterator::error`]
    Errored,
    /// Resources released
    Closed,
}

impl IteratorState {
    /// Whether no further documents can be produced
    pub fn is_terminal(&self) -> bool {
        !matches!(self, IteratorState::Ready)
    }
}

/// Cursor over paginated search results
///
/// Not safe for concurrent use; drive each iterator from one caller.
///
/// # Usage
///
/// ```ignore
/// let mut it = indexer.search(&Query::match_terms("rust"))?;
/// while it.next() {
///     println!("{}", it.document().unwrap().url);
/// }
/// if let Some(err) = it.error() { /* handle */ }
/// it.close()?;
/// ```
pub trait SearchIterator: Send {
    /// Load the next document; returns false when none is available
    fn next(&mut self) -> bool;

    /// Document latched by the last successful `next`
    ///
    /// `None` before the first successful `next` and once the iterator has
    /// reached a terminal state.
    fn document(&self) -> Option<&Document>;

    /// Approximate number of results reported when the query was issued
    fn total_count(&self) -> u64;

    /// Last error encountered, if the iterator is errored
    fn error(&self) -> Option<&Error>;

    /// Release resources; idempotent
    fn close(&mut self) -> Result<()>;
}
