//! Ports - trait definitions for client-side persistence.
//! Adapters in `resumatch-infra` implement these.

mod history;
mod session;

pub use history::{HistoryError, SearchHistoryStore};
pub use session::{SessionError, SessionStore};
