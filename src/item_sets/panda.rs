//! PaNDa: greedy extraction of dense, possibly overlapping blocks.
//!
//! Each round seeds a core on the residual dataset, grows it by local search
//! and keeps it only if the description cost over the original dataset does
//! not go up.

use std::collections::VecDeque;

use tracing::{debug, info, trace};

use super::cost::{CostEvaluator, CostModel, DEFAULT_COMPLEXITY_WEIGHT};
use super::dataset::{items_by_frequency, remove_pattern};
use super::{Dataset, Item, ItemSetMiner, Pattern, PatternList, Transaction};
use crate::error::Result;

/// Items a core rejected, waiting for a second try as columns.
pub type ExtensionQueue = VecDeque<Item>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PandaConfig {
    pub max_patterns: usize,
    pub complexity_weight: f64,
}

impl Default for PandaConfig {
    fn default() -> Self {
        Self {
            max_patterns: 8,
            complexity_weight: DEFAULT_COMPLEXITY_WEIGHT,
        }
    }
}

/// Why the last extraction loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    PatternLimit,
    /// The round's pattern would have raised the total cost.
    NoImprovement,
    /// Every cell of the dataset is already claimed.
    ResidualExhausted,
}

#[derive(Debug, Clone)]
pub struct Panda {
    max_patterns: usize,
    model: CostModel,
    last_stop: Option<StopReason>,
}

impl Panda {
    pub fn new(max_patterns: usize) -> Self {
        Self {
            max_patterns,
            model: CostModel::default(),
            last_stop: None,
        }
    }

    pub fn with_config(config: PandaConfig) -> Result<Self> {
        Ok(Self {
            max_patterns: config.max_patterns,
            model: CostModel::new(config.complexity_weight)?,
            last_stop: None,
        })
    }

    pub fn cost_model(&self) -> CostModel {
        self.model
    }

    /// `None` until [`ItemSetMiner::mine`] has run once.
    pub fn last_stop(&self) -> Option<StopReason> {
        self.last_stop
    }
}

impl ItemSetMiner for Panda {
    fn mine(&mut self, dataset: &Dataset) -> PatternList {
        let mut patterns = PatternList::new();
        let mut residual = dataset.clone();
        let mut stop = StopReason::PatternLimit;

        for round in 0..self.max_patterns {
            let evaluator = self.model.evaluator(&patterns, dataset);

            let (core, extensions) = find_core(&residual, &evaluator);
            if core.item_count() == 0 {
                debug!(round, "residual dataset is empty");
                stop = StopReason::ResidualExhausted;
                break;
            }
            debug!(
                round,
                rows = core.transaction_count(),
                items = core.item_count(),
                deferred = extensions.len(),
                "found core"
            );

            let extended = extend_core(core, extensions, &evaluator);

            let current = evaluator.base_cost();
            let with_pattern = evaluator.cost_with(&extended);
            if current < with_pattern {
                debug!(round, current, with_pattern, "pattern does not pay off");
                stop = StopReason::NoImprovement;
                break;
            }

            debug!(
                round,
                rows = extended.transaction_count(),
                items = extended.item_count(),
                cost = with_pattern,
                "accepted pattern"
            );
            remove_pattern(&mut residual, &extended);
            patterns.push(extended);
        }

        info!(patterns = patterns.len(), ?stop, "mining finished");
        self.last_stop = Some(stop);
        patterns
    }
}

/// Mines up to `max_patterns` patterns with the default complexity weight.
///
/// # Example
/// ```
/// use pate_panda::item_sets::{panda, parse_dataset};
///
/// let dataset = parse_dataset("1 2\n1 2\n1\n2 3").unwrap();
/// let patterns = panda(2, &dataset);
/// assert_eq!(patterns[0].items(), &[1, 2]);
/// assert_eq!(patterns[0].transactions().collect::<Vec<_>>(), vec![0, 1]);
/// ```
pub fn panda(max_patterns: usize, dataset: &Dataset) -> PatternList {
    Panda::new(max_patterns).mine(dataset)
}

/// Greedy seed on the residual dataset.
///
/// Starts from the most frequent residual item and intersects in the other
/// items by descending frequency; an item is taken whenever the narrower,
/// taller block costs no more. Refused items come back in rank order.
/// An empty residual yields an empty core.
pub fn find_core(residual: &[Transaction], evaluator: &CostEvaluator) -> (Pattern, ExtensionQueue) {
    let mut extensions = ExtensionQueue::new();
    let mut ranked = items_by_frequency(residual).into_iter();

    let Some(seed) = ranked.next() else {
        return (Pattern::default(), extensions);
    };

    let rows = residual
        .iter()
        .enumerate()
        .filter(|(_, row)| row.contains(seed))
        .map(|(tr_id, _)| tr_id);
    let mut core = Pattern::new(rows, [seed]);
    let mut core_cost = evaluator.cost_with(&core);

    for item in ranked {
        let mut candidate = core.with_item(item);
        candidate.retain_transactions(|&tr_id| residual[tr_id].contains(item));

        let candidate_cost = evaluator.cost_with(&candidate);
        if candidate_cost <= core_cost {
            core = candidate;
            core_cost = candidate_cost;
        } else {
            extensions.push_back(item);
        }
    }

    (core, extensions)
}

/// Local search growing `core` by rows, then by queued items, until a pass
/// takes no item.
///
/// Rows are tried over the whole dataset in index order, each against the
/// core as updated so far. The queue is drained front to back; an item is
/// consumed whether or not it is taken.
pub fn extend_core(
    mut core: Pattern,
    mut extensions: ExtensionQueue,
    evaluator: &CostEvaluator,
) -> Pattern {
    let dataset = evaluator.dataset();
    let mut core_cost = evaluator.cost_with(&core);

    loop {
        for tr_id in 0..dataset.len() {
            if core.has_transaction(tr_id) {
                continue;
            }
            let candidate = core.with_transaction(tr_id);
            let candidate_cost = evaluator.cost_with(&candidate);
            if candidate_cost <= core_cost {
                trace!(tr_id, cost = candidate_cost, "row added");
                core = candidate;
                core_cost = candidate_cost;
            }
        }

        let mut added_item = false;
        while let Some(item) = extensions.pop_front() {
            let candidate = core.with_item(item);
            let candidate_cost = evaluator.cost_with(&candidate);
            if candidate_cost <= core_cost {
                trace!(item, cost = candidate_cost, "item added");
                core = candidate;
                core_cost = candidate_cost;
                added_item = true;
                break;
            }
        }

        if !added_item {
            return core;
        }
    }
}
