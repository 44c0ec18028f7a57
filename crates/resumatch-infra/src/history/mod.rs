//! Search history stores - file and in-memory.

mod file;
mod memory;

pub use file::FileSearchHistoryStore;
pub use memory::InMemorySearchHistoryStore;

use resumatch_core::domain::{HistoryEntry, SearchQuery};
use resumatch_core::ports::{HistoryError, SearchHistoryStore};

/// Record a search in the store's history.
pub async fn record_search(
    store: &dyn SearchHistoryStore,
    query: &SearchQuery,
) -> Result<(), HistoryError> {
    let mut history = store.load().await?;
    history.record(HistoryEntry::from_query(query));
    store.save(&history).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumatch_core::domain::MAX_HISTORY_ENTRIES;

    #[tokio::test]
    async fn test_record_search_moves_repeat_to_front() {
        let store = InMemorySearchHistoryStore::new();

        record_search(&store, &SearchQuery::new("rust")).await.unwrap();
        record_search(&store, &SearchQuery::new("python")).await.unwrap();
        record_search(&store, &SearchQuery::new("rust")).await.unwrap();

        let history = store.load().await.unwrap();
        let queries: Vec<&str> = history.entries().iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["rust", "python"]);
    }

    #[tokio::test]
    async fn test_record_search_keeps_newest_entries() {
        let store = InMemorySearchHistoryStore::new();

        for i in 0..MAX_HISTORY_ENTRIES + 3 {
            record_search(&store, &SearchQuery::new(format!("query {i}")))
                .await
                .unwrap();
        }

        let history = store.load().await.unwrap();
        assert_eq!(history.entries().len(), MAX_HISTORY_ENTRIES);
        assert_eq!(
            history.entries()[0].query,
            format!("query {}", MAX_HISTORY_ENTRIES + 2)
        );
    }

    #[tokio::test]
    async fn test_location_makes_a_distinct_search() {
        let store = InMemorySearchHistoryStore::new();

        record_search(&store, &SearchQuery::new("rust")).await.unwrap();
        record_search(&store, &SearchQuery::new("rust").with_location("Berlin"))
            .await
            .unwrap();

        assert_eq!(store.load().await.unwrap().entries().len(), 2);
    }
}
