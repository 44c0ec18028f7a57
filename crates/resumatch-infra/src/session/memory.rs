//! In-memory session store - used for tests and sessions that should not
//! outlive the process.

use async_trait::async_trait;
use tokio::sync::RwLock;

use resumatch_core::domain::TokenPair;
use resumatch_core::ports::{SessionError, SessionStore};

#[derive(Default)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// Session store holding the token pair behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemorySessionStore {
    tokens: RwLock<Tokens>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            tokens: RwLock::new(Tokens::default()),
        }
    }

    /// Start with an existing session.
    pub fn with_pair(pair: TokenPair) -> Self {
        Self {
            tokens: RwLock::new(Tokens {
                access: Some(pair.access),
                refresh: Some(pair.refresh),
            }),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn access_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.tokens.read().await.access.clone())
    }

    async fn refresh_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.tokens.read().await.refresh.clone())
    }

    async fn store_pair(&self, pair: &TokenPair) -> Result<(), SessionError> {
        let mut tokens = self.tokens.write().await;
        tokens.access = Some(pair.access.clone());
        tokens.refresh = Some(pair.refresh.clone());
        Ok(())
    }

    async fn store_access(&self, access: &str) -> Result<(), SessionError> {
        self.tokens.write().await.access = Some(access.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.tokens.write().await = Tokens::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_read_pair() {
        let store = InMemorySessionStore::new();
        store.store_pair(&TokenPair::new("a", "r")).await.unwrap();

        assert_eq!(store.access_token().await.unwrap(), Some("a".to_string()));
        assert_eq!(store.refresh_token().await.unwrap(), Some("r".to_string()));
    }

    #[tokio::test]
    async fn test_store_access_keeps_refresh() {
        let store = InMemorySessionStore::with_pair(TokenPair::new("a", "r"));
        store.store_access("a2").await.unwrap();

        assert_eq!(store.access_token().await.unwrap(), Some("a2".to_string()));
        assert_eq!(store.refresh_token().await.unwrap(), Some("r".to_string()));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = InMemorySessionStore::with_pair(TokenPair::new("a", "r"));
        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }
}
