//! Authenticated HTTP client for the Resumatch backend.

mod client;
mod config;
mod refresh;
mod request;

pub use client::{AuthClient, LOGIN_FALLBACK_MESSAGE, LoginOutcome, REQUEST_ID_HEADER};
pub(crate) use client::{decode_json, public_failure};
pub use config::ClientConfig;
pub use refresh::RefreshOutcome;
pub use request::{MultipartPart, PendingRequest, RequestBody};
