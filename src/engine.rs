use std::fmt;

use serde::Serialize;

use crate::criteria::{Dimension, FilterCriteria, FilterValue};
use crate::models::Transaction;

/// A removable token for one selected filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    pub value: FilterValue,
}

impl FilterChip {
    pub fn dimension(&self) -> Dimension {
        self.value.dimension()
    }

    pub fn label(&self) -> &'static str {
        self.dimension().label()
    }
}

impl fmt::Display for FilterChip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.value)
    }
}

/// "Clear All" is only offered once more than one chip is showing.
pub fn show_clear_all(chips: &[FilterChip]) -> bool {
    chips.len() > 1
}

fn matches_search(txn: &Transaction, needle: &str) -> bool {
    txn.merchant.to_lowercase().contains(needle)
        || txn.description.to_lowercase().contains(needle)
        || txn
            .category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(needle))
}

/// Whether a single transaction satisfies every dimension of `criteria`.
pub fn matches(txn: &Transaction, criteria: &FilterCriteria) -> bool {
    passes(txn, criteria, criteria.search_needle().as_deref())
}

fn passes(txn: &Transaction, criteria: &FilterCriteria, needle: Option<&str>) -> bool {
    if let Some(needle) = needle {
        if !matches_search(txn, needle) {
            return false;
        }
    }
    if let Some(range) = &criteria.date_range {
        if !range.contains(&txn.date) {
            return false;
        }
    }
    if let Some(range) = &criteria.amount_range {
        if !range.contains(txn.amount) {
            return false;
        }
    }
    if !criteria.categories.is_empty()
        && !txn
            .category
            .as_ref()
            .is_some_and(|c| criteria.categories.contains(c))
    {
        return false;
    }
    if !criteria.statuses.is_empty()
        && !criteria.statuses.iter().any(|s| s.matches(&txn.status))
    {
        return false;
    }
    if !criteria.accounts.is_empty() && !criteria.accounts.contains(&txn.account) {
        return false;
    }
    if !criteria.types.is_empty() && !criteria.types.iter().any(|t| t.matches(&txn.kind)) {
        return false;
    }
    true
}

/// Filter `transactions`, keeping their original relative order.
pub fn apply(transactions: &[Transaction], criteria: &FilterCriteria) -> Vec<Transaction> {
    if !criteria.has_active_filters() {
        return transactions.to_vec();
    }
    let needle = criteria.search_needle();
    transactions
        .iter()
        .filter(|t| passes(t, criteria, needle.as_deref()))
        .cloned()
        .collect()
}

/// Chips in fixed dimension order: date, amount, then each category, status,
/// account and type value.
pub fn derive_chips(criteria: &FilterCriteria) -> Vec<FilterChip> {
    let mut values = Vec::new();
    if let Some(range) = criteria.date_range {
        values.push(FilterValue::DateRange(range));
    }
    if let Some(range) = criteria.amount_range {
        values.push(FilterValue::AmountRange(range));
    }
    values.extend(criteria.categories.iter().cloned().map(FilterValue::Category));
    values.extend(criteria.statuses.iter().cloned().map(FilterValue::Status));
    values.extend(criteria.accounts.iter().cloned().map(FilterValue::Account));
    values.extend(criteria.types.iter().cloned().map(FilterValue::Type));
    values.into_iter().map(|value| FilterChip { value }).collect()
}
