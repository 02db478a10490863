use serde::Serialize;

use super::{Pattern, Transaction};
use crate::error::{Error, Result};

/// Worst-case share of missing cells in a pattern, per row and per column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PatternNoise {
    /// Largest fraction of the pattern's items absent from one of its rows.
    pub row: f64,
    /// Largest fraction of the pattern's rows lacking one of its items.
    pub column: f64,
}

impl PatternNoise {
    pub fn of(pattern: &Pattern, dataset: &[Transaction]) -> Self {
        let rows = pattern.transaction_count();
        let items = pattern.item_count();
        if rows == 0 || items == 0 {
            return Self::default();
        }

        let mut column_missing = vec![0usize; items];
        let mut worst_row = 0;
        for tr_id in pattern.transactions() {
            let row = &dataset[tr_id];
            let mut missing = 0;
            for (column, &item) in pattern.items().iter().enumerate() {
                if !row.contains(item) {
                    missing += 1;
                    column_missing[column] += 1;
                }
            }
            worst_row = worst_row.max(missing);
        }
        let worst_column = column_missing.into_iter().max().unwrap_or(0);

        Self {
            row: worst_row as f64 / items as f64,
            column: worst_column as f64 / rows as f64,
        }
    }

    pub fn within(&self, max_row: f64, max_column: f64) -> bool {
        self.row <= max_row && self.column <= max_column
    }

    pub fn validate_tolerance(tolerance: f64) -> Result<f64> {
        if (0.0..=1.0).contains(&tolerance) {
            Ok(tolerance)
        } else {
            Err(Error::InvalidNoiseTolerance(tolerance))
        }
    }
}
