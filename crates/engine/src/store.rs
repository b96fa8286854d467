//! Authoritative document store
//!
//! Holds the only complete copy of every indexed document, keyed by the
//! string form of its link ID. Reads hand out clones so callers never
//! observe or cause in-place mutation.

use std::collections::HashMap;
use textindex_core::Document;

/// Map from document key to the full stored document
#[derive(Debug, Default)]
pub struct DocStore {
    docs: HashMap<String, Document>,
}

impl DocStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the document stored under `key`
    pub fn get(&self, key: &str) -> Option<Document> {
        self.docs.get(key).cloned()
    }

    /// Score of the document stored under `key`
    pub fn score_of(&self, key: &str) -> Option<f64> {
        self.docs.get(key).map(|d| d.page_rank)
    }

    /// Insert or replace; returns the previous document
    pub fn insert(&mut self, key: String, doc: Document) -> Option<Document> {
        self.docs.insert(key, doc)
    }

    /// Whether a document is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.docs.contains_key(key)
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
