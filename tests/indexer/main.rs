//! Indexer Integration Tests
//!
//! End-to-end behaviour of `InMemoryIndexer` through the public facade.

#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod conformance;
mod config_file;
mod properties;
mod search;
