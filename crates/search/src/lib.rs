//! Embedded full-text engine for the text indexer
//!
//! This crate provides:
//! - TextEngine trait: the capability surface the indexer depends on
//! - InvertedIndex: in-memory engine with positional postings
//! - Scorer trait, ScorerContext and the BM25LiteScorer default
//! - Positional tokenizer
//!
//! The engine stores a projection (title, content, rank) of each document
//! and answers term and phrase queries sorted by rank, then relevance.
//!
//! # Usage
//!
//! ```
//! use textindex_search::{EngineQuery, IndexedFields, InvertedIndex, MatchMode, TextEngine};
//!
//! let index = InvertedIndex::new();
//! index.index("doc-1", IndexedFields::new("Title", "quick brown fox", 0.4)).unwrap();
//!
//! let results = index.search(&EngineQuery::new("brown fox", MatchMode::Phrase, 10)).unwrap();
//! assert_eq!(results.total, 1);
//! assert_eq!(results.hits[0].key, "doc-1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod error;
pub mod index;
pub mod scorer;
pub mod tokenizer;

pub use engine::{EngineHit, EngineQuery, EngineResults, IndexedFields, MatchMode, TextEngine};
pub use error::EngineError;
pub use index::{InvertedIndex, PostingEntry, PostingList, POSITION_GAP};
pub use scorer::{BM25LiteScorer, Scorer, ScorerContext, SearchDoc};
pub use tokenizer::{tokenize, tokenize_unique, tokenize_with_positions};
