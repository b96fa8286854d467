//! Multi-threaded indexer behaviour
//!
//! Writers, scorers and readers race on shared link IDs. Each test checks
//! a property that holds for every serial order of the racing calls.

use crate::common::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 4;

/// Test: concurrent update_score calls on one key -> one of the written scores wins
#[test]
fn test_concurrent_scores_last_writer_wins() {
    let indexer = Arc::new(indexer_with_batch(10));
    let id = index(indexer.as_ref(), page("contended", "contended body", 0.0));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let indexer = Arc::clone(&indexer);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..100 {
                    indexer.update_score(id, (t * 1000 + i) as f64).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let final_score = indexer.find_by_id(id).unwrap().page_rank;
    let written_last: Vec<f64> = (0..THREADS).map(|t| (t * 1000 + 99) as f64).collect();
    assert!(
        written_last.contains(&final_score),
        "final score {} was not any thread's last write",
        final_score
    );

    // The engine agrees with the store
    let mut it = indexer.search(&Query::match_terms("contended")).unwrap();
    assert!(it.next());
    assert_eq!(it.document().unwrap().page_rank, final_score);
}

/// Test: re-indexing racing a score update never loses the score
#[test]
fn test_reindex_racing_update_score_keeps_score() {
    let indexer = Arc::new(indexer_with_batch(10));
    let ids: Vec<LinkId> = (0..32)
        .map(|i| index(indexer.as_ref(), page(&format!("seed {}", i), "before", 0.0)))
        .collect();
    let barrier = Arc::new(Barrier::new(2));

    let reindexer = {
        let indexer = Arc::clone(&indexer);
        let ids = ids.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for id in &ids {
                let mut doc = Document::new(*id)
                    .with_content("after")
                    .with_page_rank(-1.0);
                indexer.index(&mut doc).unwrap();
            }
        })
    };
    let scorer = {
        let indexer = Arc::clone(&indexer);
        let ids = ids.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for id in ids.iter().rev() {
                indexer.update_score(*id, 3.5).unwrap();
            }
        })
    };
    reindexer.join().unwrap();
    scorer.join().unwrap();

    for id in &ids {
        let doc = indexer.find_by_id(*id).unwrap();
        assert_eq!(doc.page_rank, 3.5);
        assert_eq!(doc.content, "after");
    }
    assert_eq!(search_ids(indexer.as_ref(), &Query::match_terms("after")).len(), ids.len());
}

/// Test: readers iterating while writers add documents never hit an error
#[test]
fn test_readers_and_writers() {
    let indexer = Arc::new(indexer_with_batch(4));
    let barrier = Arc::new(Barrier::new(THREADS * 2));
    let searches = Arc::new(AtomicU64::new(0));
    let mut handles = Vec::new();

    for t in 0..THREADS {
        let indexer = Arc::clone(&indexer);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for i in 0..40 {
                let id = index(
                    indexer.as_ref(),
                    page(&format!("writer{} doc{}", t, i), "shared harbour news", 0.0),
                );
                if i % 3 == 0 {
                    indexer.update_score(id, i as f64).unwrap();
                }
            }
        }));
    }
    for _ in 0..THREADS {
        let indexer = Arc::clone(&indexer);
        let barrier = Arc::clone(&barrier);
        let searches = Arc::clone(&searches);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..20 {
                let mut it = indexer.search(&Query::phrase("harbour news")).unwrap();
                while it.next() {
                    let doc = it.document().unwrap();
                    assert!(doc.content.contains("harbour"));
                }
                assert!(it.error().is_none(), "iteration error: {:?}", it.error());
                searches.fetch_add(1, Ordering::Relaxed);
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(searches.load(Ordering::Relaxed), (THREADS * 20) as u64);
    assert_eq!(indexer.len(), THREADS * 40);
    assert_eq!(
        search_ids(indexer.as_ref(), &Query::phrase("harbour news")).len(),
        THREADS * 40
    );
}

/// Test: an iterator keeps working after the indexer handle is dropped
#[test]
fn test_iterator_outlives_indexer() {
    let indexer = indexer_with_batch(2);
    for i in 0..5 {
        index(&indexer, page(&format!("orphan {}", i), "detached results", 0.0));
    }
    let mut it = indexer.search(&Query::match_terms("detached")).unwrap();
    drop(indexer);

    let mut n = 0;
    while it.next() {
        n += 1;
    }
    assert_eq!(n, 5);
    assert!(it.error().is_none());
}
