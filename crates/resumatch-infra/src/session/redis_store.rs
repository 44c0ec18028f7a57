//! Redis session store - shares one session between processes or machines.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use resumatch_core::domain::TokenPair;
use resumatch_core::ports::{SessionError, SessionStore};

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisSessionConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Prefix for the `<prefix>:access` and `<prefix>:refresh` keys
    pub key_prefix: String,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for RedisSessionConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            key_prefix: "resumatch:session".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisSessionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            key_prefix: std::env::var("RESUMATCH_REDIS_PREFIX")
                .unwrap_or_else(|_| "resumatch:session".to_string()),
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }
}

/// Redis-backed session store.
///
/// Uses connection manager for automatic reconnection.
pub struct RedisSessionStore {
    conn: ConnectionManager,
    access_key: String,
    refresh_key: String,
}

impl RedisSessionStore {
    pub async fn new(config: RedisSessionConfig) -> Result<Self, SessionError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| SessionError::Connection(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| SessionError::Connection("Connection timed out".to_string()))?
            .map_err(|e| SessionError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, prefix = %config.key_prefix, "Connected to Redis session store");

        Ok(Self {
            conn,
            access_key: format!("{}:access", config.key_prefix),
            refresh_key: format!("{}:refresh", config.key_prefix),
        })
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| SessionError::Operation(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn access_token(&self) -> Result<Option<String>, SessionError> {
        self.get(&self.access_key).await
    }

    async fn refresh_token(&self) -> Result<Option<String>, SessionError> {
        self.get(&self.refresh_key).await
    }

    async fn store_pair(&self, pair: &TokenPair) -> Result<(), SessionError> {
        let mut conn = self.conn.clone();

        // MULTI/EXEC so readers never see one token without the other
        let _: () = redis::pipe()
            .atomic()
            .set(&self.access_key, &pair.access)
            .ignore()
            .set(&self.refresh_key, &pair.refresh)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| SessionError::Operation(e.to_string()))?;

        Ok(())
    }

    async fn store_access(&self, access: &str) -> Result<(), SessionError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(&self.access_key, access)
            .await
            .map_err(|e| SessionError::Operation(e.to_string()))
    }

    async fn clear(&self) -> Result<(), SessionError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(vec![self.access_key.as_str(), self.refresh_key.as_str()])
            .await
            .map_err(|e| SessionError::Operation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn get_test_store(prefix: &str) -> Option<RedisSessionStore> {
        let config = RedisSessionConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            key_prefix: format!("resumatch:test:{prefix}"),
            connect_timeout: Duration::from_secs(1),
        };

        RedisSessionStore::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_session_roundtrip() {
        let store = match get_test_store("roundtrip").await {
            Some(s) => s,
            None => {
                tracing::warn!("Redis not available, skipping test");
                return;
            }
        };

        store.store_pair(&TokenPair::new("a", "r")).await.unwrap();
        assert_eq!(store.access_token().await.unwrap(), Some("a".to_string()));

        store.store_access("a2").await.unwrap();
        assert_eq!(store.access_token().await.unwrap(), Some("a2".to_string()));
        assert_eq!(store.refresh_token().await.unwrap(), Some("r".to_string()));

        store.clear().await.unwrap();
        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }
}
