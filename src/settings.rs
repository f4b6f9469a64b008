use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{LensError, Result};
use crate::search::{RecentSearches, SearchIndex, DEFAULT_RECENT_CAPACITY, DEFAULT_SUGGESTIONS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,
    #[serde(default = "default_seed_recent_searches")]
    pub seed_recent_searches: Vec<String>,
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default)]
    pub data_file: Option<String>,
}

fn default_recent_capacity() -> usize {
    DEFAULT_RECENT_CAPACITY
}

fn default_seed_recent_searches() -> Vec<String> {
    ["Amazon", "Starbucks", "Netflix"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_suggestions() -> Vec<String> {
    DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
}

fn default_max_suggestions() -> usize {
    8
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recent_capacity: default_recent_capacity(),
            seed_recent_searches: default_seed_recent_searches(),
            suggestions: default_suggestions(),
            max_suggestions: default_max_suggestions(),
            data_file: None,
        }
    }
}

impl Settings {
    /// A fresh session search index seeded from these settings.
    pub fn search_index(&self) -> SearchIndex {
        SearchIndex::new(
            RecentSearches::with_entries(self.recent_capacity, &self.seed_recent_searches),
            self.suggestions.clone(),
        )
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("txnlens")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable files fall back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed settings");
            Settings::default()
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| LensError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
