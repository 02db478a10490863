//! Mining results for the command line: plain text or JSON.

use std::fmt::Write as _;

use serde::Serialize;

use crate::item_sets::{CostBreakdown, CostModel, Item, Pattern, PatternNoise, Transaction};

#[derive(Debug, Clone, Serialize)]
pub struct PatternSummary {
    /// Items in ascending order.
    pub items: Vec<Item>,
    pub transactions: usize,
    pub noise: PatternNoise,
    pub within_tolerance: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub patterns: Vec<PatternSummary>,
    pub cost: CostBreakdown,
    pub total_cost: f64,
}

impl Report {
    pub fn new(
        patterns: &[Pattern],
        dataset: &[Transaction],
        model: CostModel,
        max_row_noise: f64,
        max_column_noise: f64,
    ) -> Self {
        let summaries = patterns
            .iter()
            .map(|pattern| {
                let mut items = pattern.items().to_vec();
                items.sort_unstable();
                let noise = PatternNoise::of(pattern, dataset);
                PatternSummary {
                    items,
                    transactions: pattern.transaction_count(),
                    noise,
                    within_tolerance: noise.within(max_row_noise, max_column_noise),
                }
            })
            .collect();

        let cost = model.breakdown(patterns, dataset);
        Self {
            patterns: summaries,
            cost,
            total_cost: cost.total(),
        }
    }

    /// One `items (rows)` line per pattern, then the total cost.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for summary in &self.patterns {
            let items: Vec<String> = summary.items.iter().map(Item::to_string).collect();
            let _ = write!(out, "{} ({})", items.join(" "), summary.transactions);
            if !summary.within_tolerance {
                let _ = write!(
                    out,
                    " noisy: row {:.2}, column {:.2}",
                    summary.noise.row, summary.noise.column
                );
            }
            out.push('\n');
        }
        let _ = writeln!(out, "cost {}", self.total_cost);
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
