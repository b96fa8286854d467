//! Query semantics: matching modes, ranking and pagination

use crate::common::*;

#[test]
fn test_match_is_case_insensitive() {
    let indexer = indexer_with_batch(10);
    let id = index(&indexer, page("Gophers", "The GOPHER burrows underground", 0.0));

    assert_eq!(search_ids(&indexer, &Query::match_terms("gopher")), vec![id]);
    assert_eq!(search_ids(&indexer, &Query::match_terms("Gopher")), vec![id]);
}

#[test]
fn test_match_covers_title_and_content() {
    let indexer = indexer_with_batch(10);
    let in_title = index(&indexer, page("lighthouse keeper", "notes", 0.2));
    let in_body = index(&indexer, page("notes", "a lighthouse on the coast", 0.1));

    assert_eq!(
        search_ids(&indexer, &Query::match_terms("lighthouse")),
        vec![in_title, in_body]
    );
}

#[test]
fn test_phrase_does_not_span_title_and_content() {
    let indexer = indexer_with_batch(10);
    index(&indexer, page("ending with apple", "pie recipes follow", 0.0));

    assert!(search_ids(&indexer, &Query::phrase("apple pie")).is_empty());
    assert_eq!(search_ids(&indexer, &Query::match_terms("apple pie")).len(), 1);
}

#[test]
fn test_phrase_tolerates_punctuation_and_case() {
    let indexer = indexer_with_batch(10);
    let id = index(&indexer, page("guide", "Learn Rust: systems-programming, today!", 0.0));

    assert_eq!(search_ids(&indexer, &Query::phrase("rust systems")), vec![id]);
    assert_eq!(search_ids(&indexer, &Query::phrase("SYSTEMS programming")), vec![id]);
}

#[test]
fn test_stopword_only_query_is_empty() {
    let indexer = indexer_with_batch(10);
    index(&indexer, page("the and of", "it is what it is", 0.0));

    let mut it = indexer.search(&Query::match_terms("the of and")).unwrap();
    assert_eq!(it.total_count(), 0);
    assert!(!it.next());
    assert!(it.error().is_none());
}

#[test]
fn test_no_match_is_empty() {
    let indexer = indexer_with_batch(10);
    index(&indexer, page("present", "words here", 0.0));
    assert!(search_ids(&indexer, &Query::match_terms("absent")).is_empty());
}

#[test]
fn test_page_rank_dominates_relevance() {
    let indexer = indexer_with_batch(10);
    // Many repetitions but a low rank
    let dense = index(
        &indexer,
        page("compiler compiler", "compiler compiler compiler", 0.1),
    );
    let sparse = index(&indexer, page("misc", "a single compiler mention among others", 0.9));

    assert_eq!(
        search_ids(&indexer, &Query::match_terms("compiler")),
        vec![sparse, dense]
    );
}

#[test]
fn test_update_score_reorders_results() {
    let indexer = indexer_with_batch(2);
    let a = index(&indexer, page("a", "reorder me", 0.5));
    let b = index(&indexer, page("b", "reorder me", 0.4));
    assert_eq!(search_ids(&indexer, &Query::match_terms("reorder")), vec![a, b]);

    indexer.update_score(b, 0.6).unwrap();
    assert_eq!(search_ids(&indexer, &Query::match_terms("reorder")), vec![b, a]);
}

#[test]
fn test_reindex_replaces_searchable_text() {
    let indexer = indexer_with_batch(10);
    let id = index(&indexer, page("draft", "volcano eruption", 0.0));

    let mut revised = Document::new(id).with_title("final").with_content("glacier retreat");
    indexer.index(&mut revised).unwrap();

    assert!(search_ids(&indexer, &Query::match_terms("volcano")).is_empty());
    assert_eq!(search_ids(&indexer, &Query::match_terms("glacier")), vec![id]);
}

#[test]
fn test_pages_match_single_batch() {
    let small = indexer_with_batch(1);
    let large = indexer_with_batch(100);
    for i in 0..23 {
        let doc = page(&format!("entry {}", i), "batch comparison", (i % 7) as f64);
        index(&small, doc.clone());
        index(&large, doc);
    }

    let query = Query::match_terms("comparison");
    assert_eq!(search_ids(&small, &query), search_ids(&large, &query));
}

#[test]
fn test_total_count_is_reported_up_front() {
    let indexer = indexer_with_batch(3);
    for i in 0..7 {
        index(&indexer, page(&format!("t{}", i), "counted", 0.0));
    }
    let mut it = indexer.search(&Query::match_terms("counted")).unwrap();
    assert_eq!(it.total_count(), 7);
    let mut n = 0;
    while it.next() {
        n += 1;
        assert_eq!(it.total_count(), 7);
    }
    assert_eq!(n, 7);
}
