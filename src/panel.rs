use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::criteria::{AmountRange, DateRange, FilterCriteria, StatusChoice, TypeChoice};
use crate::error::{LensError, Result};

/// Raw filter panel input, as typed by the user. `build` validates it into a
/// `FilterCriteria`; nothing reaches the filter engine without passing through there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPanel {
    pub date_start: String,
    pub date_end: String,
    pub amount_min: String,
    pub amount_max: String,
    pub categories: BTreeSet<String>,
    pub statuses: BTreeSet<StatusChoice>,
    pub accounts: BTreeSet<String>,
    pub types: BTreeSet<TypeChoice>,
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T, checked: bool) {
    if checked {
        set.insert(value);
    } else {
        set.remove(&value);
    }
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| LensError::InvalidDate(raw.to_string()))
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn parse_amount(raw: &str) -> Result<Option<Decimal>> {
    let trimmed = raw.trim().trim_start_matches('$').replace(',', "");
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value =
        Decimal::from_str(&trimmed).map_err(|_| LensError::InvalidAmount(raw.to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(LensError::InvalidAmount(raw.to_string()));
    }
    Ok(Some(value))
}

impl FilterPanel {
    /// Pre-fill the panel from the criteria currently in effect.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let (date_start, date_end) = match &criteria.date_range {
            Some(range) => (format_date(range.start()), format_date(range.end())),
            None => (String::new(), String::new()),
        };
        let (amount_min, amount_max) = match &criteria.amount_range {
            Some(range) => (
                range.min().normalize().to_string(),
                range.max().map(|m| m.normalize().to_string()).unwrap_or_default(),
            ),
            None => (String::new(), String::new()),
        };
        Self {
            date_start,
            date_end,
            amount_min,
            amount_max,
            categories: criteria.categories.clone(),
            statuses: criteria.statuses.clone(),
            accounts: criteria.accounts.clone(),
            types: criteria.types.clone(),
        }
    }

    pub fn toggle_category(&mut self, category: &str, checked: bool) {
        toggle(&mut self.categories, category.to_string(), checked);
    }

    /// Unrecognised text is kept as a selection that matches nothing.
    pub fn toggle_status(&mut self, status: &str, checked: bool) {
        toggle(&mut self.statuses, StatusChoice::parse(status), checked);
    }

    pub fn toggle_account(&mut self, account: &str, checked: bool) {
        toggle(&mut self.accounts, account.to_string(), checked);
    }

    pub fn toggle_type(&mut self, kind: &str, checked: bool) {
        toggle(&mut self.types, TypeChoice::parse(kind), checked);
    }

    pub fn set_date_start(&mut self, value: &str) {
        self.date_start = value.to_string();
    }

    pub fn set_date_end(&mut self, value: &str) {
        self.date_end = value.to_string();
    }

    pub fn set_amount_min(&mut self, value: &str) {
        self.amount_min = value.to_string();
    }

    pub fn set_amount_max(&mut self, value: &str) {
        self.amount_max = value.to_string();
    }

    /// The panel's own "Clear All": resets the draft, not the applied criteria.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn date_range(&self) -> Result<Option<DateRange>> {
        let start = parse_date(&self.date_start)?;
        let end = parse_date(&self.date_end)?;
        if start.is_none() && end.is_none() {
            return Ok(None);
        }
        Ok(Some(DateRange::new(start, end)?))
    }

    fn amount_range(&self) -> Result<Option<AmountRange>> {
        let min = parse_amount(&self.amount_min)?;
        let max = parse_amount(&self.amount_max)?;
        if min.is_none() && max.is_none() {
            return Ok(None);
        }
        Ok(Some(AmountRange::new(min, max)?))
    }

    /// Validate the draft. The result never carries search text.
    pub fn build(&self) -> Result<FilterCriteria> {
        Ok(FilterCriteria {
            search_text: String::new(),
            date_range: self.date_range()?,
            amount_range: self.amount_range()?,
            categories: self.categories.clone(),
            statuses: self.statuses.clone(),
            accounts: self.accounts.clone(),
            types: self.types.clone(),
        })
    }
}
