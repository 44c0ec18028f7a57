//! File-backed search history.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use resumatch_core::domain::SearchHistory;
use resumatch_core::ports::{HistoryError, SearchHistoryStore};

use crate::atomic_file::write_atomic;

/// Search history stored as a JSON array.
///
/// A missing or corrupt file reads as an empty history; recent searches are
/// a convenience and never block a search.
pub struct FileSearchHistoryStore {
    path: PathBuf,
}

impl FileSearchHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SearchHistoryStore for FileSearchHistoryStore {
    async fn load(&self) -> Result<SearchHistory, HistoryError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SearchHistory::default()),
            Err(e) => return Err(HistoryError::Io(e.to_string())),
        };

        match serde_json::from_slice(&bytes) {
            Ok(history) => Ok(history),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Discarding unreadable search history");
                Ok(SearchHistory::default())
            }
        }
    }

    async fn save(&self, history: &SearchHistory) -> Result<(), HistoryError> {
        let bytes = serde_json::to_vec_pretty(history)
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;

        write_atomic(&self.path, bytes, None)
            .await
            .map_err(|e| HistoryError::Io(e.to_string()))
    }
}
