//! Behavioural suite shared by every `Indexer` implementation

use crate::common::*;
use textindex_core::conformance;

#[test]
fn test_default_indexer_conforms() {
    init_tracing();
    conformance::run_all(|| Box::new(InMemoryIndexer::new()));
}

#[test]
fn test_single_hit_pages_conform() {
    conformance::run_all(|| Box::new(indexer_with_batch(1)));
}

#[test]
fn test_large_pages_conform() {
    conformance::run_all(|| Box::new(indexer_with_batch(1000)));
}
