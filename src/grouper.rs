use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(txn: &Transaction) -> Self {
        Self {
            year: txn.date.year(),
            month: txn.date.month(),
        }
    }

    /// "January 2024"
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Received,
    Spent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGroup {
    pub month: MonthKey,
    pub transactions: Vec<Transaction>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    pub count: usize,
}

impl MonthGroup {
    fn new(month: MonthKey) -> Self {
        Self {
            month,
            transactions: Vec::new(),
            total_amount: Decimal::ZERO,
            count: 0,
        }
    }

    fn push(&mut self, txn: &Transaction) {
        self.total_amount = self.total_amount.saturating_add(txn.amount);
        self.count += 1;
        self.transactions.push(txn.clone());
    }

    pub fn label(&self) -> String {
        self.month.label()
    }

    /// A zero net total counts as received.
    pub fn direction(&self) -> Direction {
        if self.total_amount.is_sign_negative() && !self.total_amount.is_zero() {
            Direction::Spent
        } else {
            Direction::Received
        }
    }
}

/// Bucket transactions by calendar month, newest month first. Members keep
/// their input order; totals are exact signed sums, saturating at the
/// `Decimal` bounds.
pub fn group(transactions: &[Transaction]) -> Vec<MonthGroup> {
    let mut buckets: BTreeMap<MonthKey, MonthGroup> = BTreeMap::new();
    for txn in transactions {
        let key = MonthKey::of(txn);
        buckets
            .entry(key)
            .or_insert_with(|| MonthGroup::new(key))
            .push(txn);
    }
    buckets.into_values().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::FilterCriteria;
    use crate::engine::apply;
    use crate::sample::sample_transactions;
    use proptest::prelude::*;

    fn at(txn: &Transaction, y: i32, m: u32, d: u32) -> Transaction {
        let mut t = txn.clone();
        t.date = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        t
    }

    #[test]
    fn test_empty_input_gives_no_groups() {
        assert!(group(&[]).is_empty());
    }

    #[test]
    fn test_sample_is_one_january_group() {
        let groups = group(&sample_transactions());
        assert_eq!(groups.len(), 1);
        let jan = &groups[0];
        assert_eq!(jan.month.to_string(), "2024-01");
        assert_eq!(jan.label(), "January 2024");
        assert_eq!(jan.count, 8);
        // 3500.00 - (89.99 + 12.45 + 250.00 + 15.99 + 45.30 + 127.85 + 65.20)
        assert_eq!(jan.total_amount, Decimal::new(289322, 2));
        assert_eq!(jan.direction(), Direction::Received);
    }

    #[test]
    fn test_shopping_filter_groups_to_amazon_only() {
        let criteria = FilterCriteria {
            categories: ["Shopping".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let groups = group(&apply(&sample_transactions(), &criteria));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].month, MonthKey { year: 2024, month: 1 });
        assert_eq!(groups[0].total_amount, Decimal::new(-8999, 2));
        assert_eq!(groups[0].count, 1);
        assert_eq!(groups[0].direction(), Direction::Spent);
    }

    #[test]
    fn test_groups_newest_first_members_in_input_order() {
        let base = sample_transactions();
        let txns = vec![
            at(&base[0], 2023, 12, 5),
            at(&base[1], 2024, 2, 1),
            at(&base[2], 2023, 12, 20),
            at(&base[3], 2024, 2, 28),
            at(&base[4], 2024, 1, 9),
        ];
        let groups = group(&txns);
        let keys: Vec<String> = groups.iter().map(|g| g.month.to_string()).collect();
        assert_eq!(keys, vec!["2024-02", "2024-01", "2023-12"]);
        let dec: Vec<&str> = groups[2].transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(dec, vec!["TXN001", "TXN003"]);
    }

    #[test]
    fn test_year_boundary_is_a_separate_month() {
        let base = sample_transactions();
        let txns = vec![at(&base[0], 2023, 1, 31), at(&base[1], 2024, 1, 1)];
        let groups = group(&txns);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].month.year, 2024);
    }

    #[test]
    fn test_many_small_amounts_sum_exactly() {
        let base = &sample_transactions()[0];
        let mut txns = Vec::new();
        for i in 0..1000 {
            let mut t = base.clone();
            t.id = format!("T{i}");
            t.amount = Decimal::new(-1, 1); // -0.10
            txns.push(t);
        }
        let groups = group(&txns);
        assert_eq!(groups[0].total_amount, Decimal::new(-100, 0));
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let base = &sample_transactions()[0];
        let mut txns = Vec::new();
        for (i, amount) in [Decimal::MAX, Decimal::MAX, Decimal::ONE].into_iter().enumerate() {
            let mut t = base.clone();
            t.id = format!("T{i}");
            t.amount = amount;
            txns.push(t);
        }
        let groups = group(&txns);
        assert_eq!(groups[0].count, 3);
        assert_eq!(groups[0].total_amount, Decimal::MAX);

        txns.iter_mut().for_each(|t| t.amount = Decimal::MIN);
        assert_eq!(group(&txns)[0].total_amount, Decimal::MIN);
    }

    proptest! {
        #[test]
        fn prop_group_totals_match_input_sum(
            entries in prop::collection::vec(
                (-500_000i64..500_000, 2022i32..2025, 1u32..=12),
                0..60,
            )
        ) {
            let base = &sample_transactions()[0];
            let txns: Vec<Transaction> = entries
                .iter()
                .enumerate()
                .map(|(i, (cents, y, m))| {
                    let mut t = at(base, *y, *m, 1);
                    t.id = format!("T{i}");
                    t.amount = Decimal::new(*cents, 2);
                    t
                })
                .collect();
            let groups = group(&txns);
            let grouped: Decimal = groups.iter().map(|g| g.total_amount).sum();
            let direct: Decimal = txns.iter().map(|t| t.amount).sum();
            prop_assert_eq!(grouped, direct);
            prop_assert_eq!(groups.iter().map(|g| g.count).sum::<usize>(), txns.len());
            prop_assert!(groups.windows(2).all(|w| w[0].month > w[1].month));
        }
    }
}
