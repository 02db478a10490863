mod cost;
mod dataset;
mod noise;
mod panda;
mod pattern;

pub use cost::{cost, CostBreakdown, CostEvaluator, CostModel, DEFAULT_COMPLEXITY_WEIGHT};
pub use dataset::{items_by_frequency, parse_dataset, read_dataset, remove_pattern, Transaction};
pub use noise::PatternNoise;
pub use panda::{extend_core, find_core, panda, ExtensionQueue, Panda, PandaConfig, StopReason};
pub use pattern::Pattern;

pub type Item = i64;

pub type Dataset = Vec<Transaction>;

/// Patterns in discovery order.
pub type PatternList = Vec<Pattern>;

pub trait ItemSetMiner {
    fn mine(&mut self, dataset: &Dataset) -> PatternList;
}
