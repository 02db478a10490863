use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{Dataset, Item, Pattern};
use crate::error::{Error, Result};

/// One row of the incidence matrix.
///
/// Items keep the order (and repetitions) they were loaded with; a sorted
/// copy backs membership tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    items: Vec<Item>,
    sorted: Vec<Item>,
}

impl Transaction {
    pub fn new(items: Vec<Item>) -> Self {
        let mut sorted = items.clone();
        sorted.sort_unstable();
        sorted.dedup();
        Self { items, sorted }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn contains(&self, item: Item) -> bool {
        self.sorted.binary_search(&item).is_ok()
    }

    /// Number of cells, repeated items included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn retain(&mut self, mut keep: impl FnMut(Item) -> bool) {
        self.items.retain(|&item| keep(item));
        self.sorted.retain(|&item| keep(item));
    }
}

impl From<Vec<Item>> for Transaction {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<Item> for Transaction {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Parses one transaction per line, items separated by whitespace.
///
/// Blank lines become empty transactions so row numbers match line numbers.
/// Repeated items on a line are kept as they are.
///
/// # Example
/// ```
/// use pate_panda::item_sets::parse_dataset;
///
/// let dataset = parse_dataset("1 2\n1 2\n1\n2 3\n").unwrap();
/// assert_eq!(dataset.len(), 4);
/// assert_eq!(dataset[3].items(), &[2, 3]);
/// ```
pub fn parse_dataset(input: &str) -> Result<Dataset> {
    input
        .lines()
        .enumerate()
        .map(|(index, line)| {
            line.split_whitespace()
                .map(|token| {
                    token.parse::<Item>().map_err(|_| Error::InvalidDataset {
                        line: index + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Transaction::new)
        })
        .collect()
}

pub fn read_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let input = fs::read_to_string(path)?;
    parse_dataset(&input)
}

/// Items of `dataset` ranked by descending number of occurrences.
///
/// Ties keep the order in which items were first met while scanning rows
/// front to back.
pub fn items_by_frequency(dataset: &[Transaction]) -> Vec<Item> {
    let mut slots: HashMap<Item, usize> = HashMap::new();
    let mut frequencies: Vec<(Item, usize)> = Vec::new();

    for item in dataset.iter().flat_map(|row| row.items().iter().copied()) {
        let slot = *slots.entry(item).or_insert_with(|| {
            frequencies.push((item, 0));
            frequencies.len() - 1
        });
        frequencies[slot].1 += 1;
    }

    // stable: equal counts stay in encounter order
    frequencies.sort_by(|a, b| b.1.cmp(&a.1));
    frequencies.into_iter().map(|(item, _)| item).collect()
}

/// Drops from `residual` every cell claimed by `pattern`.
pub fn remove_pattern(residual: &mut [Transaction], pattern: &Pattern) {
    for tr_id in pattern.transactions() {
        residual[tr_id].retain(|item| !pattern.has_item(item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(rows: &[&[Item]]) -> Dataset {
        rows.iter().map(|row| Transaction::new(row.to_vec())).collect()
    }

    #[test]
    fn test_parse_keeps_blank_lines_as_rows() {
        let parsed = parse_dataset("1 2\n\n3\t4  5\n").unwrap();
        assert_eq!(parsed.len(), 3);
        assert!(parsed[1].is_empty());
        assert_eq!(parsed[2].items(), &[3, 4, 5]);
    }

    #[test]
    fn test_parse_keeps_repeated_items() {
        let parsed = parse_dataset("7 7 1").unwrap();
        assert_eq!(parsed[0].items(), &[7, 7, 1]);
        assert_eq!(parsed[0].len(), 3);
        assert!(parsed[0].contains(7));
    }

    #[test]
    fn test_parse_rejects_non_numeric_token() {
        let err = parse_dataset("1 2\n3 x\n").unwrap_err();
        match err {
            Error::InvalidDataset { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_dataset("/definitely/not/here.dat").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_items_by_frequency_descending() {
        let rows = dataset(&[&[3], &[1, 2], &[1, 2], &[1], &[2, 3]]);
        // 1: 3, 2: 3, 3: 2 -- 3 is met first but is least frequent
        assert_eq!(items_by_frequency(&rows), vec![1, 2, 3]);
    }

    #[test]
    fn test_items_by_frequency_ties_in_encounter_order() {
        let rows = dataset(&[&[9, 4], &[4, 9], &[2]]);
        assert_eq!(items_by_frequency(&rows), vec![9, 4, 2]);
    }

    #[test]
    fn test_items_by_frequency_empty() {
        let rows = dataset(&[&[], &[]]);
        assert!(items_by_frequency(&rows).is_empty());
    }

    #[test]
    fn test_remove_pattern_only_touches_claimed_cells() {
        let mut residual = dataset(&[&[1, 2, 3], &[1, 2], &[1, 3]]);
        let pattern = Pattern::new([0, 1], [1, 2]);

        remove_pattern(&mut residual, &pattern);

        assert_eq!(residual[0].items(), &[3]);
        assert!(residual[1].is_empty());
        assert_eq!(residual[2].items(), &[1, 3]);
        assert!(!residual[0].contains(1));
        assert!(residual[2].contains(1));
    }
}
