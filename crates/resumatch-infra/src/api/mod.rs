//! Typed wrappers for the backend endpoints.

mod auth;
mod jobs;
mod resumes;
mod search;

pub use auth::SIGNUP_FALLBACK_MESSAGE;
pub use jobs::{DEFAULT_TOP_N, IDEMPOTENCY_KEY_HEADER};
pub use resumes::DEFAULT_LIST_LIMIT;

use crate::http::AuthClient;

/// The Resumatch backend API.
#[derive(Clone)]
pub struct ResumatchApi {
    client: AuthClient,
}

impl ResumatchApi {
    pub fn new(client: AuthClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }
}
