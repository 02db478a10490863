use std::collections::HashSet;

use serde::Serialize;

use super::{Item, Pattern, Transaction};
use crate::error::{Error, Result};

pub const DEFAULT_COMPLEXITY_WEIGHT: f64 = 0.5;

/// The three terms of the description cost of a pattern list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Claimed cells the dataset does not hold, counted once per pattern.
    pub false_positives: usize,
    /// Dataset cells no pattern claims.
    pub false_negatives: usize,
    /// Sum of `|transactions| + |items|` over all patterns.
    pub complexity: usize,
    pub complexity_weight: f64,
}

impl CostBreakdown {
    pub fn noise(&self) -> usize {
        self.false_positives + self.false_negatives
    }

    pub fn total(&self) -> f64 {
        self.noise() as f64 + self.complexity_weight * self.complexity as f64
    }
}

/// Scores pattern lists against the original dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    complexity_weight: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            complexity_weight: DEFAULT_COMPLEXITY_WEIGHT,
        }
    }
}

impl CostModel {
    pub fn new(complexity_weight: f64) -> Result<Self> {
        if !complexity_weight.is_finite() || complexity_weight < 0.0 {
            return Err(Error::InvalidComplexityWeight(complexity_weight));
        }
        Ok(Self { complexity_weight })
    }

    pub fn complexity_weight(&self) -> f64 {
        self.complexity_weight
    }

    /// Full recount over every pattern and every dataset cell.
    ///
    /// Every transaction id in `patterns` must index a row of `dataset`.
    pub fn breakdown(&self, patterns: &[Pattern], dataset: &[Transaction]) -> CostBreakdown {
        let false_negatives = dataset
            .iter()
            .enumerate()
            .map(|(tr_id, row)| {
                row.items()
                    .iter()
                    .filter(|&&item| !patterns.iter().any(|p| p.covers(tr_id, item)))
                    .count()
            })
            .sum();

        CostBreakdown {
            false_positives: patterns.iter().map(|p| false_positives(p, dataset)).sum(),
            false_negatives,
            complexity: patterns.iter().map(Pattern::complexity).sum(),
            complexity_weight: self.complexity_weight,
        }
    }

    pub fn cost(&self, patterns: &[Pattern], dataset: &[Transaction]) -> f64 {
        self.breakdown(patterns, dataset).total()
    }

    /// Prepares repeated scoring of `existing + [candidate]` for many candidates.
    pub fn evaluator<'a>(
        &self,
        existing: &[Pattern],
        dataset: &'a [Transaction],
    ) -> CostEvaluator<'a> {
        CostEvaluator::new(*self, existing, dataset)
    }
}

/// Cost of `patterns` with the default complexity weight.
///
/// # Example
/// ```
/// use pate_panda::item_sets::{cost, parse_dataset, Pattern};
///
/// let dataset = parse_dataset("5").unwrap();
/// assert_eq!(cost(&[], &dataset), 1.0);
/// assert_eq!(cost(&[Pattern::new([0], [5])], &dataset), 1.0);
/// ```
pub fn cost(patterns: &[Pattern], dataset: &[Transaction]) -> f64 {
    CostModel::default().cost(patterns, dataset)
}

fn false_positives(pattern: &Pattern, dataset: &[Transaction]) -> usize {
    pattern
        .transactions()
        .map(|tr_id| {
            let row = &dataset[tr_id];
            pattern.items().iter().filter(|&&item| !row.contains(item)).count()
        })
        .sum()
}

/// Scores one extra pattern on top of a fixed list without recounting the list.
///
/// Counts match [`CostModel::breakdown`] exactly, so comparisons between
/// candidates come out the same as with the full recount.
#[derive(Debug, Clone)]
pub struct CostEvaluator<'a> {
    dataset: &'a [Transaction],
    covered: Vec<HashSet<Item>>,
    base: CostBreakdown,
}

impl<'a> CostEvaluator<'a> {
    fn new(model: CostModel, existing: &[Pattern], dataset: &'a [Transaction]) -> Self {
        let mut covered = vec![HashSet::new(); dataset.len()];
        for pattern in existing {
            for tr_id in pattern.transactions() {
                covered[tr_id].extend(pattern.items().iter().copied());
            }
        }

        let false_negatives = dataset
            .iter()
            .zip(&covered)
            .map(|(row, claimed)| {
                row.items()
                    .iter()
                    .filter(|&&item| !claimed.contains(&item))
                    .count()
            })
            .sum();

        let base = CostBreakdown {
            false_positives: existing.iter().map(|p| false_positives(p, dataset)).sum(),
            false_negatives,
            complexity: existing.iter().map(Pattern::complexity).sum(),
            complexity_weight: model.complexity_weight,
        };

        Self {
            dataset,
            covered,
            base,
        }
    }

    pub fn dataset(&self) -> &'a [Transaction] {
        self.dataset
    }

    /// Breakdown of the existing patterns alone.
    pub fn base(&self) -> CostBreakdown {
        self.base
    }

    pub fn base_cost(&self) -> f64 {
        self.base.total()
    }

    pub fn breakdown_with(&self, candidate: &Pattern) -> CostBreakdown {
        let mut breakdown = self.base;
        breakdown.complexity += candidate.complexity();

        for tr_id in candidate.transactions() {
            let row = &self.dataset[tr_id];
            let claimed = &self.covered[tr_id];

            breakdown.false_positives += candidate
                .items()
                .iter()
                .filter(|&&item| !row.contains(item))
                .count();
            breakdown.false_negatives -= row
                .items()
                .iter()
                .filter(|&&item| candidate.has_item(item) && !claimed.contains(&item))
                .count();
        }

        breakdown
    }

    pub fn cost_with(&self, candidate: &Pattern) -> f64 {
        self.breakdown_with(candidate).total()
    }
}
