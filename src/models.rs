use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LensError;

/// Category options offered by the filter panel.
pub const CATEGORY_OPTIONS: &[&str] = &[
    "Food & Dining",
    "Shopping",
    "Transportation",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Education",
    "Groceries",
    "Gas & Fuel",
];

/// Account options offered by the filter panel.
pub const ACCOUNT_OPTIONS: &[&str] = &["Main Account", "Savings Account", "Business Account"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnStatus {
    Completed,
    Pending,
    Failed,
}

impl TxnStatus {
    pub const ALL: [TxnStatus; 3] = [TxnStatus::Completed, TxnStatus::Pending, TxnStatus::Failed];

    pub fn as_str(&self) -> &'static str {
        match self {
            TxnStatus::Completed => "completed",
            TxnStatus::Pending => "pending",
            TxnStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TxnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxnStatus {
    type Err = LensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TxnStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LensError::Other(format!("Unknown status: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Transfer,
    Payment,
    Deposit,
    Withdrawal,
    Refund,
}

impl TxnType {
    pub const ALL: [TxnType; 5] = [
        TxnType::Transfer,
        TxnType::Payment,
        TxnType::Deposit,
        TxnType::Withdrawal,
        TxnType::Refund,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Transfer => "transfer",
            TxnType::Payment => "payment",
            TxnType::Deposit => "deposit",
            TxnType::Withdrawal => "withdrawal",
            TxnType::Refund => "refund",
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxnType {
    type Err = LensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TxnType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LensError::Other(format!("Unknown transaction type: {s}")))
    }
}

/// A single account movement. Negative amounts are outflows.
///
/// Amounts are written as strings and read from either strings or JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub merchant: String,
    pub description: String,
    #[serde(serialize_with = "rust_decimal::serde::str::serialize")]
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub status: TxnStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub account: String,
    #[serde(rename = "type")]
    pub kind: TxnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::str_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub balance_after: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub has_receipt: bool,
}
