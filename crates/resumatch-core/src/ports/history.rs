//! Search history storage port.

use async_trait::async_trait;

use crate::domain::SearchHistory;

/// Persistence for the recent-searches list.
#[async_trait]
pub trait SearchHistoryStore: Send + Sync {
    /// Load the stored history. A missing or unreadable history is empty.
    async fn load(&self) -> Result<SearchHistory, HistoryError>;

    /// Overwrite the stored history.
    async fn save(&self, history: &SearchHistory) -> Result<(), HistoryError>;
}

/// Search history storage errors.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("I/O failed: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
