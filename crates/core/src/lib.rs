//! Core types and traits for the text indexer
//!
//! This crate defines the foundational types shared by every backend:
//! - LinkId: identifier of the crawled link a document belongs to
//! - Document: the canonical indexed record
//! - Query / QueryType: search request shape
//! - Indexer / SearchIterator: capability contracts
//! - Error: error taxonomy all backends map onto
//!
//! With the `conformance` feature the [`conformance`] module exposes a
//! behavioural test suite any `Indexer` implementation can run.

#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(any(test, feature = "conformance"))]
pub mod conformance;
pub mod document;
pub mod error;
pub mod query;
pub mod traits;
pub mod types;

pub use document::Document;
pub use error::{BackendError, Error, Result};
pub use query::{Query, QueryType};
pub use traits::{Indexer, IteratorState, SearchIterator};
pub use types::LinkId;
