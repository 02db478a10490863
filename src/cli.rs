//! CLI argument parsing for the `panda` binary

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::item_sets::{PandaConfig, DEFAULT_COMPLEXITY_WEIGHT};

/// Output format for mined patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per pattern, then the total cost (default)
    Text,
    /// JSON report with the cost breakdown
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "panda")]
#[command(version)]
#[command(about = "Finds approximate patterns in noisy transactional datasets", long_about = None)]
pub struct Cli {
    /// Dataset file: one transaction per line, whitespace separated integer items
    #[arg(value_name = "FILE")]
    pub dataset: PathBuf,

    /// Maximum number of patterns to extract
    #[arg(short = 'k', long = "max-patterns", default_value_t = 8)]
    pub max_patterns: usize,

    /// Weight of pattern complexity in the cost function
    #[arg(short = 'w', long = "complexity-weight", default_value_t = DEFAULT_COMPLEXITY_WEIGHT)]
    pub complexity_weight: f64,

    /// Row noise tolerance ratio used to flag reported patterns
    #[arg(long = "max-row-noise", value_name = "RATIO", default_value_t = 1.0)]
    pub max_row_noise: f64,

    /// Column noise tolerance ratio used to flag reported patterns
    #[arg(long = "max-column-noise", value_name = "RATIO", default_value_t = 1.0)]
    pub max_column_noise: f64,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    pub fn panda_config(&self) -> PandaConfig {
        PandaConfig {
            max_patterns: self.max_patterns,
            complexity_weight: self.complexity_weight,
        }
    }
}
