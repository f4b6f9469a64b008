use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LensError, Result};
use crate::models::{TxnStatus, TxnType};

/// Inclusive calendar-day range. A missing side is unbounded; when both are
/// present `start <= end` is guaranteed by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(LensError::InvalidDateRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new(Some(start), Some(end))
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// A timestamp falls in the range when its calendar day does.
    pub fn contains(&self, at: &NaiveDateTime) -> bool {
        let day = at.date();
        self.start.map_or(true, |start| day >= start) && self.end.map_or(true, |end| day <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |d: Option<NaiveDate>| {
            d.map_or_else(|| "\u{221e}".to_string(), |d| d.format("%Y-%m-%d").to_string())
        };
        write!(f, "{} - {}", side(self.start), side(self.end))
    }
}

/// Inclusive range over the magnitude of an amount. A missing max is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AmountRange {
    min: Decimal,
    max: Option<Decimal>,
}

impl AmountRange {
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Result<Self> {
        let min = min.unwrap_or(Decimal::ZERO);
        if min.is_sign_negative() && !min.is_zero() {
            return Err(LensError::InvalidAmount(min.to_string()));
        }
        if let Some(max) = max {
            if max.is_sign_negative() && !max.is_zero() {
                return Err(LensError::InvalidAmount(max.to_string()));
            }
            if min > max {
                return Err(LensError::InvalidAmountRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Option<Decimal> {
        self.max
    }

    pub fn contains(&self, amount: Decimal) -> bool {
        let magnitude = amount.abs();
        magnitude >= self.min && self.max.map_or(true, |max| magnitude <= max)
    }
}

impl fmt::Display for AmountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "${} - ${}", self.min.normalize(), max.normalize()),
            None => write!(f, "${} - $\u{221e}", self.min.normalize()),
        }
    }
}

/// A checkbox value from a closed vocabulary. Text outside the vocabulary is
/// kept as `Unknown`: it still restricts its dimension, but matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Choice<T> {
    Known(T),
    Unknown(String),
}

pub type StatusChoice = Choice<TxnStatus>;
pub type TypeChoice = Choice<TxnType>;

impl<T: FromStr> Choice<T> {
    pub fn parse(raw: &str) -> Self {
        raw.parse()
            .map_or_else(|_| Choice::Unknown(raw.trim().to_string()), Choice::Known)
    }
}

impl<T: PartialEq> Choice<T> {
    pub fn matches(&self, value: &T) -> bool {
        matches!(self, Choice::Known(known) if known == value)
    }
}

impl<T> From<T> for Choice<T> {
    fn from(value: T) -> Self {
        Choice::Known(value)
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Known(value) => write!(f, "{value}"),
            Choice::Unknown(raw) => f.write_str(raw),
        }
    }
}

/// The six independently restrictable axes, in chip display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Dimension {
    DateRange,
    AmountRange,
    Category,
    Status,
    Account,
    Type,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::DateRange => "Date Range",
            Dimension::AmountRange => "Amount",
            Dimension::Category => "Category",
            Dimension::Status => "Status",
            Dimension::Account => "Account",
            Dimension::Type => "Type",
        }
    }
}

/// A complete replacement for one dimension's restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionFilter {
    DateRange(Option<DateRange>),
    AmountRange(Option<AmountRange>),
    Categories(BTreeSet<String>),
    Statuses(BTreeSet<StatusChoice>),
    Accounts(BTreeSet<String>),
    Types(BTreeSet<TypeChoice>),
}

/// One selected value within a dimension. Ranges are treated as a single value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "dimension", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    DateRange(DateRange),
    AmountRange(AmountRange),
    Category(String),
    Status(StatusChoice),
    Account(String),
    Type(TypeChoice),
}

impl FilterValue {
    pub fn dimension(&self) -> Dimension {
        match self {
            FilterValue::DateRange(_) => Dimension::DateRange,
            FilterValue::AmountRange(_) => Dimension::AmountRange,
            FilterValue::Category(_) => Dimension::Category,
            FilterValue::Status(_) => Dimension::Status,
            FilterValue::Account(_) => Dimension::Account,
            FilterValue::Type(_) => Dimension::Type,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::DateRange(range) => write!(f, "{range}"),
            FilterValue::AmountRange(range) => write!(f, "{range}"),
            FilterValue::Category(v) | FilterValue::Account(v) => f.write_str(v),
            FilterValue::Status(status) => write!(f, "{status}"),
            FilterValue::Type(kind) => write!(f, "{kind}"),
        }
    }
}

/// Search text plus the six filter dimensions. An empty set means the
/// dimension is unrestricted. Set dimensions compare order-independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_text: String,
    pub date_range: Option<DateRange>,
    pub amount_range: Option<AmountRange>,
    pub categories: BTreeSet<String>,
    pub statuses: BTreeSet<StatusChoice>,
    pub accounts: BTreeSet<String>,
    pub types: BTreeSet<TypeChoice>,
}

impl FilterCriteria {
    pub fn with_search_text(&self, text: &str) -> Self {
        Self {
            search_text: text.to_string(),
            ..self.clone()
        }
    }

    pub fn with_dimension(&self, filter: DimensionFilter) -> Self {
        let mut next = self.clone();
        match filter {
            DimensionFilter::DateRange(range) => next.date_range = range,
            DimensionFilter::AmountRange(range) => next.amount_range = range,
            DimensionFilter::Categories(values) => next.categories = values,
            DimensionFilter::Statuses(values) => next.statuses = values,
            DimensionFilter::Accounts(values) => next.accounts = values,
            DimensionFilter::Types(values) => next.types = values,
        }
        next
    }

    /// Replace every non-search dimension with those of `panel`, keeping the
    /// current search text.
    pub fn with_filters_from(&self, panel: &FilterCriteria) -> Self {
        Self {
            search_text: self.search_text.clone(),
            ..panel.clone()
        }
    }

    pub fn clear_all(&self) -> Self {
        Self::default()
    }

    /// Drop a single value. Ranges are cleared as a whole. Removing a value
    /// that is not selected returns an equal criteria.
    pub fn remove_value(&self, value: &FilterValue) -> Self {
        let mut next = self.clone();
        match value {
            FilterValue::DateRange(_) => next.date_range = None,
            FilterValue::AmountRange(_) => next.amount_range = None,
            FilterValue::Category(v) => {
                next.categories.remove(v);
            }
            FilterValue::Status(v) => {
                next.statuses.remove(v);
            }
            FilterValue::Account(v) => {
                next.accounts.remove(v);
            }
            FilterValue::Type(v) => {
                next.types.remove(v);
            }
        }
        next
    }

    /// The search text as used for matching; blank input counts as no search.
    /// Surrounding whitespace is kept and takes part in the substring match.
    pub fn search_needle(&self) -> Option<String> {
        if self.search_text.trim().is_empty() {
            None
        } else {
            Some(self.search_text.to_lowercase())
        }
    }

    /// True when no filter dimension restricts anything (search text ignored).
    pub fn is_unrestricted(&self) -> bool {
        self.date_range.is_none()
            && self.amount_range.is_none()
            && self.categories.is_empty()
            && self.statuses.is_empty()
            && self.accounts.is_empty()
            && self.types.is_empty()
    }

    pub fn has_active_filters(&self) -> bool {
        self.search_needle().is_some() || !self.is_unrestricted()
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(needle) = self.search_needle() {
            parts.push(format!("search: {needle}"));
        }
        if let Some(range) = &self.date_range {
            parts.push(format!("date: {range}"));
        }
        if let Some(range) = &self.amount_range {
            parts.push(format!("amount: {range}"));
        }
        if !self.categories.is_empty() {
            let values: Vec<&str> = self.categories.iter().map(String::as_str).collect();
            parts.push(format!("category: {}", values.join("|")));
        }
        if !self.statuses.is_empty() {
            let values: Vec<String> = self.statuses.iter().map(ToString::to_string).collect();
            parts.push(format!("status: {}", values.join("|")));
        }
        if !self.accounts.is_empty() {
            let values: Vec<&str> = self.accounts.iter().map(String::as_str).collect();
            parts.push(format!("account: {}", values.join("|")));
        }
        if !self.types.is_empty() {
            let values: Vec<String> = self.types.iter().map(ToString::to_string).collect();
            parts.push(format!("type: {}", values.join("|")));
        }
        if parts.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn set<T: Ord + Clone>(values: &[T]) -> BTreeSet<T> {
        values.iter().cloned().collect()
    }

    fn status(value: TxnStatus) -> StatusChoice {
        Choice::Known(value)
    }

    #[test]
    fn test_date_range_rejects_start_after_end() {
        let result = DateRange::between(day(2024, 2, 1), day(2024, 1, 1));
        assert!(matches!(result, Err(LensError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_date_range_open_sides_are_unbounded() {
        let from = DateRange::new(Some(day(2024, 1, 12)), None).unwrap();
        assert!(from.contains(&day(2030, 6, 1).and_hms_opt(0, 0, 0).unwrap()));
        assert!(!from.contains(&day(2024, 1, 11).and_hms_opt(23, 59, 0).unwrap()));
        assert_eq!(from.to_string(), "2024-01-12 - \u{221e}");

        let until = DateRange::new(None, Some(day(2024, 1, 12))).unwrap();
        assert!(until.contains(&day(1999, 1, 1).and_hms_opt(0, 0, 0).unwrap()));
        assert!(!until.contains(&day(2024, 1, 13).and_hms_opt(0, 0, 0).unwrap()));
        assert_eq!(until.to_string(), "\u{221e} - 2024-01-12");
    }

    #[test]
    fn test_choice_keeps_unknown_text() {
        assert_eq!(StatusChoice::parse("Failed"), status(TxnStatus::Failed));
        let archived = StatusChoice::parse(" archived ");
        assert_eq!(archived, Choice::Unknown("archived".to_string()));
        assert_eq!(archived.to_string(), "archived");
        for known in TxnStatus::ALL {
            assert!(!archived.matches(&known));
        }
        assert!(TypeChoice::parse("refund").matches(&TxnType::Refund));
    }

    #[test]
    fn test_date_range_end_day_is_inclusive() {
        let range = DateRange::between(day(2024, 1, 10), day(2024, 1, 15)).unwrap();
        let late = day(2024, 1, 15).and_hms_opt(23, 59, 0).unwrap();
        let after = day(2024, 1, 16).and_hms_opt(0, 0, 0).unwrap();
        assert!(range.contains(&late));
        assert!(!range.contains(&after));
    }

    #[test]
    fn test_amount_range_defaults_and_bounds() {
        let open = AmountRange::new(None, None).unwrap();
        assert_eq!(open.min(), Decimal::ZERO);
        assert!(open.contains(Decimal::new(-1_000_000, 2)));

        let range =
            AmountRange::new(Some(Decimal::new(50, 0)), Some(Decimal::new(100, 0))).unwrap();
        assert!(range.contains(Decimal::new(-8999, 2)));
        assert!(range.contains(Decimal::new(-5000, 2)));
        assert!(range.contains(Decimal::new(100, 0)));
        assert!(!range.contains(Decimal::new(-1245, 2)));
    }

    #[test]
    fn test_amount_range_rejects_min_over_max() {
        let result = AmountRange::new(Some(Decimal::new(10, 0)), Some(Decimal::new(5, 0)));
        assert!(matches!(result, Err(LensError::InvalidAmountRange { .. })));
        let result = AmountRange::new(Some(Decimal::new(-1, 0)), None);
        assert!(matches!(result, Err(LensError::InvalidAmount(_))));
    }

    #[test]
    fn test_amount_range_display() {
        let open = AmountRange::new(Some(Decimal::new(2500, 2)), None).unwrap();
        assert_eq!(open.to_string(), "$25 - $\u{221e}");
        let closed = AmountRange::new(None, Some(Decimal::new(10050, 2))).unwrap();
        assert_eq!(closed.to_string(), "$0 - $100.5");
    }

    #[test]
    fn test_with_dimension_replaces_only_that_dimension() {
        let base = FilterCriteria {
            search_text: "coffee".to_string(),
            statuses: set(&[status(TxnStatus::Completed)]),
            ..Default::default()
        };
        let next = base.with_dimension(DimensionFilter::Categories(set(&[
            "Shopping".to_string(),
        ])));
        assert_eq!(next.search_text, "coffee");
        assert_eq!(next.statuses, base.statuses);
        assert!(next.categories.contains("Shopping"));
        assert!(base.categories.is_empty());
    }

    #[test]
    fn test_equality_is_order_independent() {
        let a = FilterCriteria::default().with_dimension(DimensionFilter::Types(
            [TxnType::Refund, TxnType::Deposit].map(Choice::Known).into_iter().collect(),
        ));
        let b = FilterCriteria::default().with_dimension(DimensionFilter::Types(
            [TxnType::Deposit, TxnType::Refund].map(Choice::Known).into_iter().collect(),
        ));
        assert_eq!(a, b);
    }

    #[test]
    fn test_remove_value_missing_is_noop() {
        let base = FilterCriteria {
            categories: set(&["Shopping".to_string()]),
            ..Default::default()
        };
        let same = base.remove_value(&FilterValue::Category("Travel".to_string()));
        assert_eq!(same, base);
    }

    #[test]
    fn test_remove_value_clears_whole_range() {
        let range = DateRange::between(day(2024, 1, 1), day(2024, 1, 31)).unwrap();
        let base = FilterCriteria {
            date_range: Some(range),
            accounts: set(&["Main Account".to_string()]),
            ..Default::default()
        };
        let next = base.remove_value(&FilterValue::DateRange(range));
        assert!(next.date_range.is_none());
        assert_eq!(next.accounts, base.accounts);
    }

    #[test]
    fn test_with_filters_from_keeps_search_text() {
        let current = FilterCriteria {
            search_text: "uber".to_string(),
            categories: set(&["Travel".to_string()]),
            ..Default::default()
        };
        let panel = FilterCriteria {
            search_text: "ignored".to_string(),
            statuses: set(&[status(TxnStatus::Pending)]),
            ..Default::default()
        };
        let next = current.with_filters_from(&panel);
        assert_eq!(next.search_text, "uber");
        assert!(next.categories.is_empty());
        assert_eq!(next.statuses, set(&[status(TxnStatus::Pending)]));
    }

    #[test]
    fn test_blank_search_is_not_active() {
        let criteria = FilterCriteria::default().with_search_text("   ");
        assert!(criteria.search_needle().is_none());
        assert!(!criteria.has_active_filters());
        assert!(criteria.with_search_text(" Amazon ").has_active_filters());
    }

    #[test]
    fn test_search_needle_keeps_inner_and_outer_spaces() {
        let criteria = FilterCriteria::default().with_search_text(" Gas St");
        assert_eq!(criteria.search_needle().as_deref(), Some(" gas st"));
    }

    #[test]
    fn test_clear_all_resets_everything() {
        let busy = FilterCriteria {
            search_text: "x".to_string(),
            types: set(&[Choice::Known(TxnType::Payment)]),
            ..Default::default()
        };
        assert_eq!(busy.clear_all(), FilterCriteria::default());
    }

    #[test]
    fn test_display_summary() {
        assert_eq!(FilterCriteria::default().to_string(), "none");
        let criteria = FilterCriteria {
            search_text: "Amazon".to_string(),
            statuses: set(&[status(TxnStatus::Failed)]),
            ..Default::default()
        };
        assert_eq!(criteria.to_string(), "search: amazon, status: failed");
    }
}
