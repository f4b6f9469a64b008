use std::collections::HashSet;

use tracing::debug;

pub const DEFAULT_RECENT_CAPACITY: usize = 5;

/// Static merchant vocabulary offered while typing.
pub const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Amazon",
    "Starbucks",
    "Netflix",
    "Uber",
    "McDonald's",
    "Apple Store",
    "Walmart",
    "Target",
];

/// Committed queries, most recent first, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSearches {
    entries: Vec<String>,
    capacity: usize,
}

impl RecentSearches {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Seed with entries given most-recent-first.
    pub fn with_entries<I, S>(capacity: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut recent = Self::new(capacity);
        let entries: Vec<S> = entries.into_iter().collect();
        for entry in entries.iter().rev() {
            recent.commit(entry.as_ref());
        }
        recent
    }

    /// Record a query at the front. Blank queries and a repeat of the current
    /// front entry leave the list untouched. Returns whether the list changed.
    pub fn commit(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() || self.entries.first().is_some_and(|front| front == query) {
            return false;
        }
        self.entries.retain(|e| e != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.capacity);
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RecentSearches {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}

/// Recent-search memory plus a static suggestion vocabulary.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    recent: RecentSearches,
    vocabulary: Vec<String>,
}

impl SearchIndex {
    pub fn new(recent: RecentSearches, vocabulary: Vec<String>) -> Self {
        Self { recent, vocabulary }
    }

    pub fn commit(&mut self, query: &str) -> bool {
        let changed = self.recent.commit(query);
        if changed {
            debug!(query = query.trim(), recent = self.recent.len(), "committed search");
        }
        changed
    }

    pub fn recent(&self) -> &[String] {
        self.recent.entries()
    }

    pub fn recent_capacity(&self) -> usize {
        self.recent.capacity()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Up to `max_results` candidates containing `query` (case-insensitive):
    /// recent searches first, then the vocabulary, each in its own order.
    /// Candidates differing only by case are listed once.
    pub fn suggestions(&self, query: &str, max_results: usize) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        let mut seen = HashSet::new();
        self.recent
            .entries()
            .iter()
            .chain(self.vocabulary.iter())
            .filter(|candidate| candidate.to_lowercase().contains(&needle))
            .filter(|candidate| seen.insert(candidate.to_lowercase()))
            .take(max_results)
            .cloned()
            .collect()
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new(
            RecentSearches::default(),
            DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        )
    }
}
