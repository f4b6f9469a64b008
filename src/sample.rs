use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{Transaction, TxnStatus, TxnType};

struct SampleTxn {
    id: &'static str,
    merchant: &'static str,
    description: &'static str,
    /// Amount in cents.
    cents: i64,
    date: (i32, u32, u32, u32, u32),
    status: TxnStatus,
    category: &'static str,
    kind: TxnType,
    payment_method: &'static str,
    reference: &'static str,
    balance_after_cents: i64,
    has_receipt: bool,
    notes: &'static str,
}

const ACCOUNT_NAME: &str = "Main Account";

const SAMPLE: &[SampleTxn] = &[
    SampleTxn {
        id: "TXN001",
        merchant: "Amazon",
        description: "Online Purchase",
        cents: -8999,
        date: (2024, 1, 15, 14, 30),
        status: TxnStatus::Completed,
        category: "Shopping",
        kind: TxnType::Payment,
        payment_method: "card",
        reference: "REF001",
        balance_after_cents: 1_236_076,
        has_receipt: true,
        notes: "Electronics purchase",
    },
    SampleTxn {
        id: "TXN002",
        merchant: "Starbucks",
        description: "Coffee & Pastries",
        cents: -1245,
        date: (2024, 1, 15, 9, 15),
        status: TxnStatus::Completed,
        category: "Food & Dining",
        kind: TxnType::Payment,
        payment_method: "card",
        reference: "REF002",
        balance_after_cents: 1_245_075,
        has_receipt: true,
        notes: "Morning coffee",
    },
    SampleTxn {
        id: "TXN003",
        merchant: "John Doe",
        description: "Money Transfer",
        cents: -25000,
        date: (2024, 1, 14, 16, 45),
        status: TxnStatus::Completed,
        category: "Transfer",
        kind: TxnType::Transfer,
        payment_method: "wallet",
        reference: "REF003",
        balance_after_cents: 1_246_320,
        has_receipt: false,
        notes: "Dinner split payment",
    },
    SampleTxn {
        id: "TXN004",
        merchant: "Salary Deposit",
        description: "Monthly Salary",
        cents: 350_000,
        date: (2024, 1, 1, 0, 0),
        status: TxnStatus::Completed,
        category: "Income",
        kind: TxnType::Deposit,
        payment_method: "bank",
        reference: "REF004",
        balance_after_cents: 1_271_320,
        has_receipt: true,
        notes: "January salary",
    },
    SampleTxn {
        id: "TXN005",
        merchant: "Netflix",
        description: "Monthly Subscription",
        cents: -1599,
        date: (2024, 1, 13, 12, 0),
        status: TxnStatus::Completed,
        category: "Entertainment",
        kind: TxnType::Payment,
        payment_method: "card",
        reference: "REF005",
        balance_after_cents: 921_320,
        has_receipt: true,
        notes: "Streaming service",
    },
    SampleTxn {
        id: "TXN006",
        merchant: "Uber",
        description: "Ride to Airport",
        cents: -4530,
        date: (2024, 1, 12, 7, 30),
        status: TxnStatus::Pending,
        category: "Transportation",
        kind: TxnType::Payment,
        payment_method: "card",
        reference: "REF006",
        balance_after_cents: 922_919,
        has_receipt: true,
        notes: "Airport transfer",
    },
    SampleTxn {
        id: "TXN007",
        merchant: "Walmart",
        description: "Grocery Shopping",
        cents: -12785,
        date: (2024, 1, 11, 18, 20),
        status: TxnStatus::Completed,
        category: "Groceries",
        kind: TxnType::Payment,
        payment_method: "card",
        reference: "REF007",
        balance_after_cents: 927_449,
        has_receipt: true,
        notes: "Weekly groceries",
    },
    SampleTxn {
        id: "TXN008",
        merchant: "Gas Station",
        description: "Fuel Purchase",
        cents: -6520,
        date: (2024, 1, 10, 14, 15),
        status: TxnStatus::Failed,
        category: "Gas & Fuel",
        kind: TxnType::Payment,
        payment_method: "card",
        reference: "REF008",
        balance_after_cents: 940_234,
        has_receipt: false,
        notes: "Card declined",
    },
];

fn timestamp((y, m, d, hh, mm): (i32, u32, u32, u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hh, mm, 0))
        .unwrap_or_default()
}

/// The reference dataset: eight transactions between Jan 1 and Jan 15, 2024.
pub fn sample_transactions() -> Vec<Transaction> {
    SAMPLE
        .iter()
        .map(|s| Transaction {
            id: s.id.to_string(),
            merchant: s.merchant.to_string(),
            description: s.description.to_string(),
            amount: Decimal::new(s.cents, 2),
            date: timestamp(s.date),
            status: s.status,
            category: Some(s.category.to_string()),
            account: ACCOUNT_NAME.to_string(),
            kind: s.kind,
            reference: Some(s.reference.to_string()),
            payment_method: Some(s.payment_method.to_string()),
            balance_after: Some(Decimal::new(s.balance_after_cents, 2)),
            notes: Some(s.notes.to_string()),
            has_receipt: s.has_receipt,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_has_eight_unique_transactions() {
        let txns = sample_transactions();
        assert_eq!(txns.len(), 8);
        let ids: HashSet<_> = txns.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_sample_dates_are_january_2024() {
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        for t in sample_transactions() {
            let day = t.date.date();
            assert!(day >= first && day <= last, "{} out of range", t.id);
        }
    }
}
