use serde::Serialize;
use tracing::debug;

use crate::criteria::FilterCriteria;
use crate::engine::{self, FilterChip};
use crate::grouper::{self, MonthGroup};
use crate::panel::FilterPanel;
use crate::search::SearchIndex;
use crate::store::TransactionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    /// No search text and every dimension unrestricted.
    Idle,
    Filtered,
}

/// Everything the history screen needs to draw the transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub groups: Vec<MonthGroup>,
    pub has_active_filters: bool,
    /// True when nothing matched, whether or not filters are active.
    pub is_empty: bool,
}

impl RenderModel {
    pub fn empty_state_message(&self) -> Option<&'static str> {
        if !self.is_empty {
            None
        } else if self.has_active_filters {
            Some("No transactions match your filters")
        } else {
            Some("No transactions found")
        }
    }
}

/// Owns one session's filter state and keeps criteria, chips and the grouped
/// view consistent. Every event recomputes the render model.
pub struct HistoryViewController {
    store: TransactionStore,
    search: SearchIndex,
    criteria: FilterCriteria,
    chips: Vec<FilterChip>,
    render: RenderModel,
}

impl HistoryViewController {
    pub fn new(store: TransactionStore, search: SearchIndex) -> Self {
        let mut controller = Self {
            store,
            search,
            criteria: FilterCriteria::default(),
            chips: Vec::new(),
            render: RenderModel {
                groups: Vec::new(),
                has_active_filters: false,
                is_empty: true,
            },
        };
        controller.recompute();
        controller
    }

    /// Update the live search text. Does not touch recent searches.
    pub fn set_search_text(&mut self, text: &str) -> &RenderModel {
        self.criteria = self.criteria.with_search_text(text);
        self.recompute()
    }

    /// Finalize the current search text (submit, or the user paused typing).
    pub fn commit_search(&mut self) -> bool {
        let text = self.criteria.search_text.clone();
        self.search.commit(&text)
    }

    /// Open the filter panel, pre-filled with the filters currently in effect.
    pub fn filter_panel(&self) -> FilterPanel {
        FilterPanel::from_criteria(&self.criteria)
    }

    /// Replace every filter dimension with the panel's; search text is kept.
    pub fn apply_filter_panel(&mut self, panel: &FilterCriteria) -> &RenderModel {
        self.criteria = self.criteria.with_filters_from(panel);
        self.recompute()
    }

    pub fn remove_chip(&mut self, chip: &FilterChip) -> &RenderModel {
        self.criteria = self.criteria.remove_value(&chip.value);
        self.recompute()
    }

    pub fn clear_all(&mut self) -> &RenderModel {
        self.criteria = self.criteria.clear_all();
        self.recompute()
    }

    fn recompute(&mut self) -> &RenderModel {
        let filtered = engine::apply(self.store.transactions(), &self.criteria);
        self.chips = engine::derive_chips(&self.criteria);
        self.render = RenderModel {
            is_empty: filtered.is_empty(),
            has_active_filters: self.criteria.has_active_filters(),
            groups: grouper::group(&filtered),
        };
        debug!(
            criteria = %self.criteria,
            matched = filtered.len(),
            groups = self.render.groups.len(),
            "recomputed history view"
        );
        &self.render
    }

    pub fn render_model(&self) -> &RenderModel {
        &self.render
    }

    pub fn state(&self) -> ViewState {
        if self.criteria.has_active_filters() {
            ViewState::Filtered
        } else {
            ViewState::Idle
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn chips(&self) -> &[FilterChip] {
        &self.chips
    }

    pub fn recent_searches(&self) -> &[String] {
        self.search.recent()
    }

    /// Suggestions for the text currently in the search box.
    pub fn suggestions(&self, max_results: usize) -> Vec<String> {
        self.search.suggestions(&self.criteria.search_text, max_results)
    }
}
