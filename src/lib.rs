//! Textindex - in-memory full-text indexer for crawled web documents
//!
//! Stores crawled pages, keeps a positional inverted index over their title
//! and body, and answers keyword and phrase queries ranked by an externally
//! computed page rank.
//!
//! # Quick Start
//!
//! ```
//! use textindex::{Document, Indexer, InMemoryIndexer, LinkId, Query, SearchIterator};
//!
//! let indexer = InMemoryIndexer::new();
//! let mut doc = Document::new(LinkId::new())
//!     .with_url("https://example.com/rust")
//!     .with_title("Rust")
//!     .with_content("A systems programming language");
//! indexer.index(&mut doc)?;
//! indexer.update_score(doc.link_id, 0.8)?;
//!
//! let mut it = indexer.search(&Query::phrase("systems programming"))?;
//! while it.next() {
//!     let hit = it.document().unwrap();
//!     assert_eq!(hit.page_rank, 0.8);
//! }
//! it.close()?;
//! # Ok::<(), textindex::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `textindex-core`: document model, queries, errors and the `Indexer`
//!   and `SearchIterator` contracts
//! - `textindex-search`: tokenizer, BM25 scoring and the positional index
//! - `textindex-engine`: the in-memory indexer, its iterator and config

pub use textindex_core::{
    Document, Error, Indexer, IteratorState, LinkId, Query, QueryType, Result, SearchIterator,
};
pub use textindex_engine::{
    IndexerConfig, InMemoryIndexer, InMemoryIterator, ScoringConfig, CONFIG_FILE_NAME,
};

/// Full-text engine building blocks
pub mod search {
    pub use textindex_search::*;
}
