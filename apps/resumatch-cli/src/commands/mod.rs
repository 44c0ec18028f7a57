//! CLI command implementations.

mod auth;
mod history;
mod jobs;
mod resumes;
mod search;

pub use auth::{login, logout, signup, status};
pub use history::{history_clear, history_list, history_remove, history_run};
pub use jobs::{jobs_create, jobs_list, jobs_match};
pub use resumes::{resumes_list, resumes_show, upload};
pub use search::{ask, search};

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use resumatch_core::ports::SessionStore;
use resumatch_infra::{AuthClient, FileSearchHistoryStore, FileSessionStore, ResumatchApi};

use crate::config::{AppConfig, SessionBackend};
use crate::output::OutputFormat;

/// Everything a command needs.
pub struct Context {
    pub api: ResumatchApi,
    pub history: FileSearchHistoryStore,
    pub format: OutputFormat,
}

impl Context {
    pub async fn new(config: AppConfig, format: OutputFormat) -> Result<Self> {
        let session = session_store(&config.session).await?;
        let client = AuthClient::new(config.client, session)?;

        Ok(Self {
            api: ResumatchApi::new(client),
            history: FileSearchHistoryStore::new(config.history_file),
            format,
        })
    }
}

async fn session_store(backend: &SessionBackend) -> Result<Arc<dyn SessionStore>> {
    match backend {
        SessionBackend::File(path) => {
            tracing::debug!(path = %path.display(), "Using file session store");
            Ok(Arc::new(FileSessionStore::new(path.clone())))
        }
        #[cfg(feature = "redis")]
        SessionBackend::Redis(config) => {
            let store = resumatch_infra::RedisSessionStore::new(config.clone())
                .await
                .context("Failed to connect to the Redis session store")?;
            Ok(Arc::new(store))
        }
    }
}

/// Read one line from stdin after printing `label`.
fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

/// Use `value` when given, otherwise ask for it.
fn value_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt(label),
    }
}

/// Use `value` when given, otherwise ask for it without echo.
fn password_or_prompt(value: Option<String>) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => rpassword::prompt_password("Password: ").context("Failed to read password"),
    }
}
