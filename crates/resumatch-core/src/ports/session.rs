//! Session (credential) storage port.

use async_trait::async_trait;

use crate::domain::TokenPair;

/// Durable storage for the access/refresh token pair.
///
/// Implementations are shared across concurrent requests; the latest write
/// wins. Nothing here tracks expiry, that is discovered from 401 responses.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current access token, if any.
    async fn access_token(&self) -> Result<Option<String>, SessionError>;

    /// Current refresh token, if any.
    async fn refresh_token(&self) -> Result<Option<String>, SessionError>;

    /// Replace both tokens.
    async fn store_pair(&self, pair: &TokenPair) -> Result<(), SessionError>;

    /// Replace the access token, keeping the refresh token.
    async fn store_access(&self, access: &str) -> Result<(), SessionError>;

    /// Remove both tokens. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Session storage errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
