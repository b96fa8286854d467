//! In-memory indexer for crawled web documents
//!
//! Ties the authoritative [`DocStore`](store::DocStore) to a
//! [`TextEngine`](textindex_search::TextEngine) and exposes both through the
//! [`Indexer`](textindex_core::Indexer) contract.
//!
//! # Example
//!
//! ```
//! use textindex_core::{Document, Indexer, LinkId, Query, SearchIterator};
//! use textindex_engine::InMemoryIndexer;
//!
//! let indexer = InMemoryIndexer::new();
//! let mut doc = Document::new(LinkId::new())
//!     .with_title("Rust ownership")
//!     .with_content("Borrowing rules explained");
//! indexer.index(&mut doc).unwrap();
//!
//! let mut it = indexer.search(&Query::match_terms("borrowing")).unwrap();
//! assert!(it.next());
//! assert_eq!(it.document().unwrap().link_id, doc.link_id);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod indexer;
pub mod iterator;
pub mod store;

pub use config::{IndexerConfig, ScoringConfig, CONFIG_FILE_NAME, DEFAULT_BATCH_SIZE};
pub use indexer::InMemoryIndexer;
pub use iterator::InMemoryIterator;
pub use store::DocStore;
