//! File-backed session store - the durable default for the command line.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use resumatch_core::domain::TokenPair;
use resumatch_core::ports::{SessionError, SessionStore};

use crate::atomic_file::write_atomic;

#[derive(Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
}

/// Session store persisting the token pair as a small JSON file.
///
/// Writes go to a private, synced sibling temp file which is then renamed over
/// the target, so a reader never observes a half-written pair. A missing file
/// is an empty session.
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<SessionFile, SessionError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SessionFile::default()),
            Err(e) => return Err(SessionError::Operation(e.to_string())),
        };

        serde_json::from_slice(&bytes).map_err(|e| SessionError::Serialization(e.to_string()))
    }

    async fn write(&self, session: &SessionFile) -> Result<(), SessionError> {
        let bytes = serde_json::to_vec_pretty(session)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;

        write_atomic(&self.path, bytes, Some(0o600))
            .await
            .map_err(|e| SessionError::Operation(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn access_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.read().await?.access)
    }

    async fn refresh_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.read().await?.refresh)
    }

    async fn store_pair(&self, pair: &TokenPair) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().await;
        self.write(&SessionFile {
            access: Some(pair.access.clone()),
            refresh: Some(pair.refresh.clone()),
        })
        .await
    }

    async fn store_access(&self, access: &str) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().await;
        let mut session = self.read().await?;
        session.access = Some(access.to_string());
        self.write(&session).await
    }

    async fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Operation(e.to_string())),
        }
    }
}
