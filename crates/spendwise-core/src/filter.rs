//! Transaction search and category filter
//!
//! A builder narrowing a transaction snapshot by free-text search and
//! category. Both conditions must hold when both are set.

use crate::models::Transaction;

/// Category value meaning "every category"
pub const ALL_CATEGORIES: &str = "All";

/// Builder for filtering transactions
///
/// The lifetime `'query` is how long the search text and category borrowed
/// from the caller must stay valid.
#[derive(Debug, Default, Clone)]
pub struct TransactionFilter<'query> {
    pub search: Option<&'query str>,
    pub category: Option<&'query str>,
}

impl<'query> TransactionFilter<'query> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search text (case-insensitive, matches description or category)
    pub fn search(mut self, query: Option<&'query str>) -> Self {
        self.search = query;
        self
    }

    /// Set exact category; [`ALL_CATEGORIES`] disables the filter
    pub fn category(mut self, category: Option<&'query str>) -> Self {
        self.category = category;
        self
    }

    /// Whether a transaction passes both conditions
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.matches_search(tx) && self.matches_category(tx)
    }

    /// Transactions passing the filter, in input order
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|tx| self.matches(tx)).collect()
    }

    fn matches_search(&self, tx: &Transaction) -> bool {
        let Some(query) = self.search else {
            return true;
        };
        let needle = query.to_lowercase();
        tx.description.to_lowercase().contains(&needle)
            || tx.category.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, tx: &Transaction) -> bool {
        match self.category {
            Some(category) if category != ALL_CATEGORIES => tx.category == category,
            _ => true,
        }
    }
}
