use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SearchQuery;

/// Number of recent searches kept.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// A previously run search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn from_query(query: &SearchQuery) -> Self {
        Self {
            query: query.text.trim().to_string(),
            location: query.location.clone(),
            experience: query.experience.clone(),
            timestamp: Utc::now(),
        }
    }

    fn same_search(&self, other: &HistoryEntry) -> bool {
        self.query == other.query
            && self.location == other.location
            && self.experience == other.experience
    }

    /// Rebuild the search this entry was recorded from.
    pub fn to_query(&self) -> SearchQuery {
        let mut query = SearchQuery::new(self.query.clone());
        query.location = self.location.clone();
        query.experience = self.experience.clone();
        query
    }
}

/// Recent searches, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<HistoryEntry>,
}

impl SearchHistory {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a search at the front, dropping an older identical search and
    /// anything beyond the cap.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.retain(|existing| !existing.same_search(&entry));
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
    }

    pub fn remove(&mut self, index: usize) -> Option<HistoryEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
