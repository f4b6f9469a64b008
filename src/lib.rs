//! Transaction history search, filtering and monthly grouping.
//!
//! A [`store::TransactionStore`] is filtered by [`engine::apply`] using a
//! [`criteria::FilterCriteria`], and the result is bucketed by month with
//! [`grouper::group`]. [`controller::HistoryViewController`] ties these
//! together with [`search::SearchIndex`] for one browsing session.

pub mod cli;
pub mod controller;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod fmt;
pub mod grouper;
pub mod models;
pub mod panel;
pub mod sample;
pub mod search;
pub mod settings;
pub mod store;
