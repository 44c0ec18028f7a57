//! # Resumatch Infrastructure
//!
//! Concrete implementations of the ports defined in `resumatch-core`, plus the
//! authenticated HTTP client and the typed API surface built on it.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - File and in-memory session stores only
//! - `redis` - Redis-backed session store

pub mod api;
mod atomic_file;
pub mod history;
pub mod http;
pub mod session;

// Re-exports
pub use api::ResumatchApi;
pub use history::{FileSearchHistoryStore, InMemorySearchHistoryStore};
pub use http::{AuthClient, ClientConfig, LoginOutcome, PendingRequest, RefreshOutcome};
pub use session::{FileSessionStore, InMemorySessionStore};

#[cfg(feature = "redis")]
pub use session::{RedisSessionConfig, RedisSessionStore};
