//! Session store implementations - file, in-memory and Redis.

mod file;
mod memory;

#[cfg(feature = "redis")]
mod redis_store;

pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;

#[cfg(feature = "redis")]
pub use redis_store::{RedisSessionConfig, RedisSessionStore};
