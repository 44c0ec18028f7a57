//! In-memory search history store - for tests and throwaway sessions.

use async_trait::async_trait;
use tokio::sync::RwLock;

use resumatch_core::domain::SearchHistory;
use resumatch_core::ports::{HistoryError, SearchHistoryStore};

/// Search history kept for the lifetime of the process.
#[derive(Default)]
pub struct InMemorySearchHistoryStore {
    history: RwLock<SearchHistory>,
}

impl InMemorySearchHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchHistoryStore for InMemorySearchHistoryStore {
    async fn load(&self) -> Result<SearchHistory, HistoryError> {
        Ok(self.history.read().await.clone())
    }

    async fn save(&self, history: &SearchHistory) -> Result<(), HistoryError> {
        *self.history.write().await = history.clone();
        Ok(())
    }
}
