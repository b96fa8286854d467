//! The document model
//!
//! A [`Document`] is the canonical record the indexer stores and returns.
//! Values handed to callers are always independent copies; mutating one
//! never affects indexed state.

use crate::types::LinkId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One crawled page's indexable content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// ID of the link-graph entry that points to this document
    pub link_id: LinkId,

    /// URL the document was obtained from
    pub url: String,

    /// Document title (if available)
    pub title: String,

    /// Document body; the main searchable text
    pub content: String,

    /// Last time this document was indexed. Set by the indexer.
    pub indexed_at: DateTime<Utc>,

    /// Relevance score computed by the link-scoring collaborator
    pub page_rank: f64,
}

impl Document {
    /// Create an empty document for a link
    pub fn new(link_id: LinkId) -> Self {
        Document {
            link_id,
            url: String::new(),
            title: String::new(),
            content: String::new(),
            indexed_at: DateTime::<Utc>::UNIX_EPOCH,
            page_rank: 0.0,
        }
    }

    /// Create a score-only placeholder with empty text fields
    pub fn placeholder(link_id: LinkId, page_rank: f64) -> Self {
        Document::new(link_id).with_page_rank(page_rank)
    }

    /// Builder: set URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builder: set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder: set content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Builder: set page rank
    pub fn with_page_rank(mut self, page_rank: f64) -> Self {
        self.page_rank = page_rank;
        self
    }

    /// Key used by the engine and the document store
    pub fn key(&self) -> String {
        self.link_id.to_string()
    }
}
