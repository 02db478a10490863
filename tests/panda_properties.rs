//! Property-based tests for the PaNDa miner
//!
//! Random small datasets; every run is checked against a straightforward
//! miner that recounts the full cost for every candidate.

use std::collections::VecDeque;

use pate_panda::item_sets::{
    cost, items_by_frequency, panda, remove_pattern, CostModel, Dataset, Item, Pattern,
    Transaction,
};
use proptest::prelude::*;

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(prop::collection::vec(0i64..6, 0..5), 0..8)
        .prop_map(|rows| rows.into_iter().map(Transaction::new).collect())
}

fn with(patterns: &[Pattern], candidate: &Pattern) -> Vec<Pattern> {
    let mut all = patterns.to_vec();
    all.push(candidate.clone());
    all
}

/// Full-recount miner used as the reference for the incremental one.
fn reference_panda(max_patterns: usize, dataset: &Dataset) -> Vec<Pattern> {
    let model = CostModel::default();
    let score = |patterns: &[Pattern], candidate: &Pattern| model.cost(&with(patterns, candidate), dataset);

    let mut patterns: Vec<Pattern> = Vec::new();
    let mut residual = dataset.clone();

    for _ in 0..max_patterns {
        let ranked = items_by_frequency(&residual);
        let Some((&seed, rest)) = ranked.split_first() else {
            break;
        };

        let rows = (0..residual.len()).filter(|&tr_id| residual[tr_id].contains(seed));
        let mut core = Pattern::new(rows, [seed]);
        let mut queue: VecDeque<Item> = VecDeque::new();
        for &item in rest {
            let rows = core.transactions().filter(|&tr_id| residual[tr_id].contains(item));
            let items = core.items().iter().copied().chain([item]);
            let candidate = Pattern::new(rows.collect::<Vec<_>>(), items.collect::<Vec<_>>());
            if score(&patterns, &candidate) <= score(&patterns, &core) {
                core = candidate;
            } else {
                queue.push_back(item);
            }
        }

        let mut added = true;
        while added {
            for tr_id in 0..dataset.len() {
                if !core.has_transaction(tr_id) {
                    let candidate = core.with_transaction(tr_id);
                    if score(&patterns, &candidate) <= score(&patterns, &core) {
                        core = candidate;
                    }
                }
            }
            added = false;
            while let Some(item) = queue.pop_front() {
                let candidate = core.with_item(item);
                if score(&patterns, &candidate) <= score(&patterns, &core) {
                    core = candidate;
                    added = true;
                    break;
                }
            }
        }

        if model.cost(&patterns, dataset) < score(&patterns, &core) {
            break;
        }
        remove_pattern(&mut residual, &core);
        patterns.push(core);
    }

    patterns
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_matches_full_recount_miner(dataset in dataset_strategy(), k in 0usize..4) {
        prop_assert_eq!(panda(k, &dataset), reference_panda(k, &dataset));
    }

    #[test]
    fn prop_deterministic(dataset in dataset_strategy(), k in 0usize..4) {
        let first = panda(k, &dataset);
        let second = panda(k, &dataset);
        prop_assert_eq!(cost(&first, &dataset), cost(&second, &dataset));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_cost_never_rises(dataset in dataset_strategy(), k in 0usize..5) {
        let patterns = panda(k, &dataset);
        for accepted in 1..=patterns.len() {
            prop_assert!(
                cost(&patterns[..accepted], &dataset) <= cost(&patterns[..accepted - 1], &dataset)
            );
        }
    }

    #[test]
    fn prop_patterns_are_valid(dataset in dataset_strategy(), k in 0usize..5) {
        let patterns = panda(k, &dataset);
        prop_assert!(patterns.len() <= k);
        for pattern in &patterns {
            prop_assert!(pattern.transactions().all(|tr_id| tr_id < dataset.len()));
            let mut items = pattern.items().to_vec();
            items.sort_unstable();
            items.dedup();
            prop_assert_eq!(items.len(), pattern.item_count());
        }
    }

    #[test]
    fn prop_no_patterns_costs_every_cell(dataset in dataset_strategy()) {
        let cells: usize = dataset.iter().map(Transaction::len).sum();
        prop_assert!(panda(0, &dataset).is_empty());
        prop_assert_eq!(cost(&[], &dataset), cells as f64);
    }

    #[test]
    fn prop_residual_loses_only_claimed_cells(
        dataset in dataset_strategy(),
        rows in prop::collection::vec(0usize..8, 0..4),
        items in prop::collection::vec(0i64..6, 0..3),
    ) {
        let rows: Vec<usize> = rows.into_iter().filter(|&tr_id| tr_id < dataset.len()).collect();
        let pattern = Pattern::new(rows, items);
        let mut residual = dataset.clone();

        remove_pattern(&mut residual, &pattern);

        for (tr_id, (before, after)) in dataset.iter().zip(&residual).enumerate() {
            let kept: Vec<Item> = before
                .items()
                .iter()
                .copied()
                .filter(|&item| !pattern.covers(tr_id, item))
                .collect();
            prop_assert_eq!(after.items(), kept.as_slice());
        }
    }

    #[test]
    fn prop_evaluator_agrees_with_breakdown(
        dataset in dataset_strategy(),
        k in 0usize..3,
        rows in prop::collection::vec(0usize..8, 0..5),
        items in prop::collection::vec(0i64..8, 0..4),
    ) {
        let existing = panda(k, &dataset);
        let rows: Vec<usize> = rows.into_iter().filter(|&tr_id| tr_id < dataset.len()).collect();
        let candidate = Pattern::new(rows, items);
        let model = CostModel::default();

        let evaluator = model.evaluator(&existing, &dataset);

        prop_assert_eq!(evaluator.base(), model.breakdown(&existing, &dataset));
        prop_assert_eq!(
            evaluator.breakdown_with(&candidate),
            model.breakdown(&with(&existing, &candidate), &dataset)
        );
    }
}

#[test]
fn test_dense_block_comes_before_rare_item() {
    let dataset: Dataset = vec![
        Transaction::new(vec![1, 2]),
        Transaction::new(vec![1, 2]),
        Transaction::new(vec![1]),
        Transaction::new(vec![2, 3]),
    ];

    let patterns = panda(2, &dataset);

    assert_eq!(patterns[0], Pattern::new([0, 1], [1, 2]));
    assert!(patterns.iter().all(|p| !p.has_item(3)));
}

#[test]
fn test_single_cell_dataset() {
    let dataset: Dataset = vec![Transaction::new(vec![5])];

    let patterns = panda(1, &dataset);

    assert_eq!(patterns, vec![Pattern::new([0], [5])]);
    assert_eq!(cost(&patterns, &dataset), 1.0);
}
