use std::collections::BTreeSet;

use serde::Serialize;

use super::Item;

/// A block of the incidence matrix: every (transaction, item) pair of the
/// cross product is claimed, whether or not the dataset holds it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pattern {
    transactions: BTreeSet<usize>,
    items: Vec<Item>,
}

impl Pattern {
    /// Builds a pattern; repeated transaction ids or items are kept once.
    pub fn new(
        transactions: impl IntoIterator<Item = usize>,
        items: impl IntoIterator<Item = Item>,
    ) -> Self {
        let mut pattern = Self {
            transactions: transactions.into_iter().collect(),
            items: Vec::new(),
        };
        for item in items {
            pattern.add_item(item);
        }
        pattern
    }

    /// Transaction ids in ascending order.
    pub fn transactions(&self) -> impl Iterator<Item = usize> + '_ {
        self.transactions.iter().copied()
    }

    /// Items in the order they joined the pattern.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn has_transaction(&self, tr_id: usize) -> bool {
        self.transactions.contains(&tr_id)
    }

    #[inline]
    pub fn has_item(&self, item: Item) -> bool {
        self.items.contains(&item)
    }

    #[inline]
    pub fn covers(&self, tr_id: usize, item: Item) -> bool {
        self.has_transaction(tr_id) && self.has_item(item)
    }

    /// Description size: one id per row plus one per item.
    pub fn complexity(&self) -> usize {
        self.transactions.len() + self.items.len()
    }

    /// Number of claimed cells.
    pub fn area(&self) -> usize {
        self.transactions.len() * self.items.len()
    }

    pub fn add_transaction(&mut self, tr_id: usize) {
        self.transactions.insert(tr_id);
    }

    pub fn add_item(&mut self, item: Item) {
        if !self.has_item(item) {
            self.items.push(item);
        }
    }

    pub fn with_transaction(&self, tr_id: usize) -> Self {
        let mut candidate = self.clone();
        candidate.add_transaction(tr_id);
        candidate
    }

    pub fn with_item(&self, item: Item) -> Self {
        let mut candidate = self.clone();
        candidate.add_item(item);
        candidate
    }

    /// Keeps the transactions for which `keep` holds.
    pub fn retain_transactions(&mut self, keep: impl FnMut(&usize) -> bool) {
        self.transactions.retain(keep);
    }
}
