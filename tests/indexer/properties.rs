//! Property-based checks of score preservation and paging

use crate::common::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Index { slot: usize, rank: f64 },
    Score { slot: usize, score: f64 },
}

fn op_strategy(slots: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..slots, 0.0f64..10.0).prop_map(|(slot, rank)| Op::Index { slot, rank }),
        (0..slots, 0.0f64..10.0).prop_map(|(slot, score)| Op::Score { slot, score }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The stored score is the first indexed rank, overwritten only by update_score
    #[test]
    fn prop_score_follows_model(ops in prop::collection::vec(op_strategy(4), 1..40)) {
        let indexer = indexer_with_batch(3);
        let ids: Vec<LinkId> = (0..4).map(|_| LinkId::new()).collect();
        let mut model: Vec<Option<f64>> = vec![None; 4];

        for op in &ops {
            match *op {
                Op::Index { slot, rank } => {
                    let mut doc = Document::new(ids[slot])
                        .with_content("modelled document")
                        .with_page_rank(rank);
                    indexer.index(&mut doc).unwrap();
                    if model[slot].is_none() {
                        model[slot] = Some(rank);
                    }
                }
                Op::Score { slot, score } => {
                    indexer.update_score(ids[slot], score).unwrap();
                    model[slot] = Some(score);
                }
            }
        }

        for (slot, expected) in model.iter().enumerate() {
            match expected {
                Some(score) => {
                    prop_assert_eq!(indexer.find_by_id(ids[slot]).unwrap().page_rank, *score);
                }
                None => {
                    prop_assert!(indexer.find_by_id(ids[slot]).unwrap_err().is_not_found());
                }
            }
        }
    }

    /// Iteration order is non-increasing in page_rank regardless of batch size
    #[test]
    fn prop_results_sorted_by_rank(
        ranks in prop::collection::vec(0u32..5, 1..30),
        batch in 1usize..8,
    ) {
        let indexer = indexer_with_batch(batch);
        for (i, rank) in ranks.iter().enumerate() {
            index(&indexer, page(&format!("item {}", i), "sortable", *rank as f64));
        }

        let mut it = indexer.search(&Query::match_terms("sortable")).unwrap();
        let mut seen = Vec::new();
        while it.next() {
            seen.push(it.document().unwrap().page_rank);
        }
        prop_assert_eq!(seen.len(), ranks.len());
        prop_assert!(seen.windows(2).all(|w| w[0] >= w[1]));
    }
}
