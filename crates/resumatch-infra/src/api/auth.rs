use serde_json::Value;
use tracing::info;

use resumatch_core::ApiError;
use resumatch_core::domain::Registration;
use resumatch_shared::dto::RegisterRequest;

use super::ResumatchApi;
use crate::http::{LoginOutcome, PendingRequest, public_failure};

/// Message shown for a failed signup without a server message.
pub const SIGNUP_FALLBACK_MESSAGE: &str = "Signup failed";

impl ResumatchApi {
    /// POST /register
    ///
    /// Returns the server's response body; its shape is up to the backend.
    pub async fn register(&self, registration: &Registration) -> Result<Value, ApiError> {
        let request = PendingRequest::post(self.client.endpoint("register")).json(&RegisterRequest {
            username: registration.username.clone(),
            email: registration.email.clone(),
            password: registration.password.clone(),
            role: registration.role.to_string(),
        })?;

        let response = self.client.send_public(request).await?;
        if !response.status().is_success() {
            return Err(public_failure(response, SIGNUP_FALLBACK_MESSAGE).await);
        }

        info!(username = %registration.username, role = %registration.role, "Account registered");
        let body = response.bytes().await.map_err(|_| ApiError::transport())?;
        // Some backends answer 201 with an empty body
        Ok(serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        self.client.login(username, password).await
    }

    /// Register, then log in with the same credentials.
    pub async fn signup_and_login(&self, registration: &Registration) -> Result<LoginOutcome, ApiError> {
        self.register(registration).await?;
        self.client
            .login(&registration.username, &registration.password)
            .await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.logout().await
    }
}
