//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};
use resumatch_infra::ClientConfig;
#[cfg(feature = "redis")]
use resumatch_infra::RedisSessionConfig;

/// Where the credential pair lives between runs.
#[derive(Debug, Clone)]
pub enum SessionBackend {
    File(PathBuf),
    #[cfg(feature = "redis")]
    Redis(RedisSessionConfig),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub session: SessionBackend,
    pub history_file: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let data_dir = data_dir();

        let session_file = env::var("RESUMATCH_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("session.json"));

        let session = match env::var("RESUMATCH_SESSION_BACKEND")
            .unwrap_or_else(|_| "file".to_string())
            .to_lowercase()
            .as_str()
        {
            "file" => SessionBackend::File(session_file),
            #[cfg(feature = "redis")]
            "redis" => SessionBackend::Redis(RedisSessionConfig::from_env()),
            other => bail!("Unsupported session backend: {other}"),
        };

        Ok(Self {
            client: ClientConfig::from_env(),
            session,
            history_file: env::var("RESUMATCH_HISTORY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir.join("history.json")),
        })
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, api_base: Option<String>, session_file: Option<PathBuf>) -> Self {
        if let Some(base_url) = api_base {
            self.client = self.client.with_base_url(base_url);
        }
        if let Some(path) = session_file {
            self.session = SessionBackend::File(path);
        }
        self
    }
}

/// Per-user directory for the session and history files.
fn data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("resumatch")
}
