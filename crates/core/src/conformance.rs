//! Behavioural test suite shared by all Indexer backends
//!
//! Each check receives a freshly constructed, empty indexer and panics on
//! the first violated expectation. Backends wire the suite into their own
//! test harness through [`run_all`]:
//!
//! ```ignore
//! #[test]
//! fn in_memory_indexer_conforms() {
//!     textindex_core::conformance::run_all(|| Box::new(InMemoryIndexer::new()));
//! }
//! ```

use crate::document::Document;
use crate::error::Error;
use crate::query::Query;
use crate::traits::{Indexer, SearchIterator};
use crate::types::LinkId;
use chrono::Utc;

/// Run every check against indexers produced by `factory`
pub fn run_all<F>(factory: F)
where
    F: Fn() -> Box<dyn Indexer>,
{
    check_index_round_trip(factory().as_ref());
    check_index_missing_key(factory().as_ref());
    check_find_by_id_not_found(factory().as_ref());
    check_reindex_preserves_score(factory().as_ref());
    check_update_score_creates_placeholder(factory().as_ref());
    check_update_score_existing_document(factory().as_ref());
    check_returned_documents_are_copies(factory().as_ref());
    check_phrase_and_term_search(factory().as_ref());
    check_search_orders_by_score(factory().as_ref());
    check_pagination_exhaustion(factory().as_ref(), 25);
    check_search_offset(factory().as_ref());
    check_iterator_close_is_idempotent(factory().as_ref());
    check_rust_scenario(factory().as_ref());
}

/// Drain an iterator into link IDs, asserting it finished without error
pub fn collect_ids(it: &mut dyn SearchIterator) -> Vec<LinkId> {
    let mut ids = Vec::new();
    while it.next() {
        let doc = it.document().expect("document latched after next()");
        ids.push(doc.link_id);
    }
    assert!(it.error().is_none(), "iterator error: {:?}", it.error());
    it.close().expect("close iterator");
    ids
}

fn search_ids(indexer: &dyn Indexer, query: &Query) -> Vec<LinkId> {
    let mut it = indexer.search(query).expect("search");
    collect_ids(it.as_mut())
}

/// Indexed documents are returned unchanged, with `indexed_at` stamped
pub fn check_index_round_trip(indexer: &dyn Indexer) {
    let before = Utc::now();
    let mut doc = Document::new(LinkId::new())
        .with_url("http://example.com")
        .with_title("Illustrious examples")
        .with_content("Lorem ipsum dolor");
    indexer.index(&mut doc).expect("index");
    assert!(doc.indexed_at >= before, "indexed_at stamped on caller's copy");

    let got = indexer.find_by_id(doc.link_id).expect("find_by_id");
    assert_eq!(got.link_id, doc.link_id);
    assert_eq!(got.url, doc.url);
    assert_eq!(got.title, doc.title);
    assert_eq!(got.content, doc.content);
    assert!(got.indexed_at >= before);
    assert_eq!(got.page_rank, 0.0);
}

/// The nil link ID is rejected and nothing is stored
pub fn check_index_missing_key(indexer: &dyn Indexer) {
    let mut doc = Document::new(LinkId::nil()).with_content("orphaned content");
    let err = indexer.index(&mut doc).expect_err("nil link ID must be rejected");
    assert!(matches!(err, Error::MissingKey), "unexpected error: {err}");
    assert!(indexer.find_by_id(LinkId::nil()).is_err());
    assert!(search_ids(indexer, &Query::match_terms("orphaned")).is_empty());
}

/// Unknown link IDs yield `NotFound`
pub fn check_find_by_id_not_found(indexer: &dyn Indexer) {
    let err = indexer
        .find_by_id(LinkId::new())
        .expect_err("lookup of unknown link must fail");
    assert!(err.is_not_found(), "unexpected error: {err}");
}

/// Re-indexing keeps the previously stored score
pub fn check_reindex_preserves_score(indexer: &dyn Indexer) {
    let id = LinkId::new();
    let mut doc = Document::new(id).with_content("first version");
    indexer.index(&mut doc).expect("index");
    indexer.update_score(id, 0.75).expect("update_score");

    let mut doc = Document::new(id)
        .with_content("second version")
        .with_page_rank(0.01);
    indexer.index(&mut doc).expect("reindex");

    let got = indexer.find_by_id(id).expect("find_by_id");
    assert_eq!(got.page_rank, 0.75);
    assert_eq!(got.content, "second version");
}

/// Scoring an unknown link creates a discoverable placeholder
pub fn check_update_score_creates_placeholder(indexer: &dyn Indexer) {
    let id = LinkId::new();
    indexer.update_score(id, 0.5).expect("update_score");

    let got = indexer.find_by_id(id).expect("placeholder stored");
    assert_eq!(got.link_id, id);
    assert_eq!(got.page_rank, 0.5);
    assert!(got.url.is_empty() && got.title.is_empty() && got.content.is_empty());

    // Content added later keeps the score and becomes searchable
    let mut doc = Document::new(id).with_content("placeholder filled in");
    indexer.index(&mut doc).expect("index");
    assert_eq!(indexer.find_by_id(id).expect("find").page_rank, 0.5);
    assert_eq!(search_ids(indexer, &Query::match_terms("placeholder")), vec![id]);
}

/// Scoring an existing document leaves its text untouched
pub fn check_update_score_existing_document(indexer: &dyn Indexer) {
    let id = LinkId::new();
    let mut doc = Document::new(id).with_title("Title").with_content("Body");
    indexer.index(&mut doc).expect("index");
    indexer.update_score(id, 0.3).expect("update_score");
    indexer.update_score(id, 0.6).expect("update_score");

    let got = indexer.find_by_id(id).expect("find_by_id");
    assert_eq!(got.page_rank, 0.6);
    assert_eq!(got.title, "Title");
    assert_eq!(got.content, "Body");
}

/// Mutating returned documents never affects stored state
pub fn check_returned_documents_are_copies(indexer: &dyn Indexer) {
    let id = LinkId::new();
    let mut doc = Document::new(id).with_content("immutable body");
    indexer.index(&mut doc).expect("index");

    doc.content = "changed after indexing".into();
    let mut got = indexer.find_by_id(id).expect("find_by_id");
    assert_eq!(got.content, "immutable body");

    got.content = "changed after lookup".into();
    assert_eq!(indexer.find_by_id(id).expect("find").content, "immutable body");
}

/// Phrase queries require adjacency; term queries do not
pub fn check_phrase_and_term_search(indexer: &dyn Indexer) {
    let adjacent = LinkId::new();
    let scattered = LinkId::new();
    let mut doc = Document::new(adjacent).with_content("The quick brown fox jumped.");
    indexer.index(&mut doc).expect("index");
    let mut doc = Document::new(scattered)
        .with_content("A quick reply was sent. Later a fox was seen near the farm.");
    indexer.index(&mut doc).expect("index");

    let phrase = search_ids(indexer, &Query::phrase("brown fox"));
    assert_eq!(phrase, vec![adjacent]);

    let mut terms = search_ids(indexer, &Query::match_terms("fox quick"));
    terms.sort();
    let mut expected = vec![adjacent, scattered];
    expected.sort();
    assert_eq!(terms, expected);

    assert!(search_ids(indexer, &Query::phrase("quick fox")).is_empty());
}

/// Results are ordered by descending score
pub fn check_search_orders_by_score(indexer: &dyn Indexer) {
    let mut expected = Vec::new();
    for i in 0..5 {
        let id = LinkId::new();
        let mut doc = Document::new(id).with_content("ranked result page");
        indexer.index(&mut doc).expect("index");
        indexer
            .update_score(id, (i + 1) as f64 / 10.0)
            .expect("update_score");
        expected.push(id);
    }
    expected.reverse();

    let ids = search_ids(indexer, &Query::match_terms("ranked"));
    assert_eq!(ids, expected);

    let scores: Vec<f64> = ids
        .iter()
        .map(|id| indexer.find_by_id(*id).expect("find").page_rank)
        .collect();
    assert!(scores.windows(2).all(|w| w[0] > w[1]), "scores: {scores:?}");
}

/// An iterator over `n` matches yields exactly `n` documents then stops cleanly
pub fn check_pagination_exhaustion(indexer: &dyn Indexer, n: usize) {
    for i in 0..n {
        let mut doc = Document::new(LinkId::new()).with_content(format!("paginated entry {i}"));
        indexer.index(&mut doc).expect("index");
    }

    let mut it = indexer
        .search(&Query::match_terms("paginated"))
        .expect("search");
    assert_eq!(it.total_count(), n as u64);

    let mut seen = std::collections::HashSet::new();
    while it.next() {
        let doc = it.document().expect("document latched");
        assert!(seen.insert(doc.link_id), "duplicate result {}", doc.link_id);
    }
    assert_eq!(seen.len(), n);
    assert!(it.error().is_none());
    assert!(!it.next(), "exhausted iterator stays exhausted");
    it.close().expect("close");
}

/// A query offset skips leading results
pub fn check_search_offset(indexer: &dyn Indexer) {
    for i in 0..6 {
        let id = LinkId::new();
        let mut doc = Document::new(id).with_content("offset target");
        indexer.index(&mut doc).expect("index");
        indexer.update_score(id, i as f64).expect("update_score");
    }
    let all = search_ids(indexer, &Query::match_terms("offset"));
    let tail = search_ids(indexer, &Query::match_terms("offset").with_offset(4));
    assert_eq!(tail, all[4..].to_vec());
}

/// `close` can be called repeatedly in any state
pub fn check_iterator_close_is_idempotent(indexer: &dyn Indexer) {
    let mut doc = Document::new(LinkId::new()).with_content("closable");
    indexer.index(&mut doc).expect("index");

    let mut it = indexer.search(&Query::match_terms("closable")).expect("search");
    it.close().expect("first close");
    it.close().expect("second close");
    assert!(!it.next());
    assert!(it.document().is_none());
}

/// Index, score, re-index: score kept, content replaced
pub fn check_rust_scenario(indexer: &dyn Indexer) {
    let id = LinkId::new();
    let mut doc = Document::new(id).with_content("rust systems programming");
    indexer.index(&mut doc).expect("index");
    indexer.update_score(id, 0.9).expect("update_score");
    let mut doc = Document::new(id).with_content("rust systems programming language");
    indexer.index(&mut doc).expect("reindex");

    let got = indexer.find_by_id(id).expect("find_by_id");
    assert_eq!(got.page_rank, 0.9);
    assert_eq!(got.content, "rust systems programming language");
    assert_eq!(search_ids(indexer, &Query::phrase("programming language")), vec![id]);
}
