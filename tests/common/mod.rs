//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::sync::Once;
pub use textindex::{
    Document, Error, Indexer, IndexerConfig, InMemoryIndexer, IteratorState, LinkId, Query,
    SearchIterator,
};

static INIT_TRACING: Once = Once::new();

/// Install a test subscriber honouring `RUST_LOG`; safe to call repeatedly.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Fresh indexer with the given page size.
pub fn indexer_with_batch(batch_size: usize) -> InMemoryIndexer {
    init_tracing();
    InMemoryIndexer::with_config(IndexerConfig::default().with_batch_size(batch_size))
        .expect("valid config")
}

/// Document with a random link ID and a URL derived from the title.
pub fn page(title: &str, content: &str, page_rank: f64) -> Document {
    Document::new(LinkId::new())
        .with_url(format!("https://example.com/{}", title.replace(' ', "-")))
        .with_title(title)
        .with_content(content)
        .with_page_rank(page_rank)
}

/// Index `doc` and return its link ID.
pub fn index(indexer: &dyn Indexer, mut doc: Document) -> LinkId {
    indexer.index(&mut doc).expect("index");
    doc.link_id
}

/// Drain a query and return the link IDs in iteration order.
pub fn search_ids(indexer: &dyn Indexer, query: &Query) -> Vec<LinkId> {
    let mut it = indexer.search(query).expect("search");
    let mut ids = Vec::new();
    while it.next() {
        ids.push(it.document().expect("latched document").link_id);
    }
    assert!(it.error().is_none(), "iteration failed: {:?}", it.error());
    it.close().expect("close");
    ids
}
