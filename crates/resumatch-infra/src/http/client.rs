//! The authenticated request client.
//!
//! Every call carries the stored access token as a bearer credential. A 401
//! triggers at most one token refresh and one replay of the original request;
//! anything still failing afterwards becomes an [`ApiError`] whose message is
//! the server's `detail` or a fixed fallback.

use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use resumatch_core::ApiError;
use resumatch_core::domain::TokenPair;
use resumatch_core::ports::SessionStore;
use resumatch_shared::dto::{LoginRequest, TokenResponse};
use resumatch_shared::response::{ErrorBody, FALLBACK_ERROR_MESSAGE, detail_message};

use super::config::ClientConfig;
use super::refresh::RefreshOutcome;
use super::request::PendingRequest;

/// Header carrying a per-call correlation id. A replay after refresh reuses it.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Message shown for a rejected login whose body has no `detail`.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Invalid username or password";

/// Result of a login attempt that reached the server.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Tokens were issued and persisted.
    Authenticated(TokenPair),
    /// The server refused; nothing was persisted. `body` is the parsed
    /// failure body, or `null` when it was not JSON.
    Rejected { status: u16, body: Value },
}

impl LoginOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, LoginOutcome::Authenticated(_))
    }

    /// Message to show for a rejected login.
    pub fn rejection_message(&self) -> Option<String> {
        match self {
            LoginOutcome::Authenticated(_) => None,
            LoginOutcome::Rejected { body, .. } => Some(
                body.get("detail")
                    .and_then(Value::as_str)
                    .filter(|d| !d.is_empty())
                    .unwrap_or(LOGIN_FALLBACK_MESSAGE)
                    .to_string(),
            ),
        }
    }
}

/// HTTP client with bearer authentication and refresh-on-401.
///
/// Cheap to clone; clones share the connection pool, the session store and
/// the refresh guard.
#[derive(Clone)]
pub struct AuthClient {
    pub(super) http: Client,
    pub(super) config: Arc<ClientConfig>,
    pub(super) session: Arc<dyn SessionStore>,
    // Held while a refresh triggered by a 401 is in flight
    pub(super) refresh_guard: Arc<Mutex<()>>,
}

impl AuthClient {
    pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            config: Arc::new(config),
            session,
            refresh_guard: Arc::new(Mutex::new(())),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Absolute URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Whether an access token is currently stored.
    pub async fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.session.access_token().await?.is_some())
    }

    /// Perform an authenticated call.
    ///
    /// Returns the raw 2xx response; the caller decodes it per endpoint.
    pub async fn send(&self, request: PendingRequest) -> Result<Response, ApiError> {
        let request_id = Uuid::new_v4();
        let token = self.session.access_token().await?;

        let mut response = self.execute(&request, token.as_deref(), request_id).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!(%request_id, url = %request.url, "Access token rejected, attempting refresh");

            match self.refresh_after_unauthorized(token.as_deref()).await? {
                RefreshOutcome::Refreshed(fresh) => {
                    response = self.execute(&request, Some(&fresh), request_id).await?;
                }
                RefreshOutcome::Unavailable => {
                    warn!(%request_id, url = %request.url, "Session could not be refreshed");
                }
            }
        }

        if !response.status().is_success() {
            return Err(failure(response, request_id).await);
        }

        Ok(response)
    }

    /// [`send`](Self::send) and decode the JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: PendingRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        decode_json(response).await
    }

    /// Perform a call without credentials and without refresh handling.
    ///
    /// The response is returned whatever its status.
    pub async fn send_public(&self, request: PendingRequest) -> Result<Response, ApiError> {
        self.execute(&request, None, Uuid::new_v4()).await
    }

    /// Exchange credentials for a token pair and persist it on success.
    ///
    /// A refusal is not an error: it comes back as [`LoginOutcome::Rejected`]
    /// so callers can show the server's own message.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let request = PendingRequest::post(self.endpoint("login/")).json(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;

        let response = self.send_public(request).await?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, "Failed to read login response");
            ApiError::transport()
        })?;

        if !status.is_success() {
            info!(username, status = status.as_u16(), "Login rejected");
            return Ok(LoginOutcome::Rejected {
                status: status.as_u16(),
                body: serde_json::from_slice(&body).unwrap_or(Value::Null),
            });
        }

        let tokens: TokenResponse = serde_json::from_slice(&body)
            .map_err(|_| ApiError::decode("Unexpected login response from server"))?;
        let pair = TokenPair::new(tokens.access, tokens.refresh);
        self.session.store_pair(&pair).await?;

        info!(username, "Logged in");
        Ok(LoginOutcome::Authenticated(pair))
    }

    /// Forget both tokens. No network call.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.session.clear().await?;
        info!("Logged out");
        Ok(())
    }

    async fn execute(
        &self,
        request: &PendingRequest,
        bearer: Option<&str>,
        request_id: Uuid,
    ) -> Result<Response, ApiError> {
        let response = request
            .build(&self.http, bearer)?
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await
            .map_err(|e| {
                warn!(%request_id, url = %request.url, error = %e, "Request failed before a response was received");
                ApiError::transport()
            })?;

        debug!(
            %request_id,
            method = %request.method,
            url = %request.url,
            status = response.status().as_u16(),
            authenticated = bearer.is_some(),
            "Response received"
        );
        Ok(response)
    }
}

/// Turn a non-2xx response into the normalized error.
async fn failure(response: Response, request_id: Uuid) -> ApiError {
    let status = response.status().as_u16();
    // An unreadable body is treated like an unparsable one
    let body = response.bytes().await.unwrap_or_default();

    let message = detail_message(&body).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
    warn!(%request_id, status, message = %message, "Request failed");
    ApiError::request(status, message)
}

/// Decode a 2xx JSON body.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let url = response.url().to_string();
    let body = response.bytes().await.map_err(|e| {
        warn!(url = %url, error = %e, "Failed to read response body");
        ApiError::transport()
    })?;

    serde_json::from_slice(&body).map_err(|e| {
        warn!(url = %url, error = %e, "Response did not match the expected shape");
        ApiError::decode("Unexpected response from server")
    })
}

/// Message for a failed unauthenticated call: `error.message`, then
/// `detail`, then `fallback`.
pub(crate) async fn public_failure(response: Response, fallback: &str) -> ApiError {
    let status = response.status().as_u16();
    let body = response.bytes().await.unwrap_or_default();

    let message = ErrorBody::parse(&body)
        .and_then(|b| {
            b.nested_message()
                .or_else(|| b.detail())
                .map(String::from)
        })
        .unwrap_or_else(|| fallback.to_string());
    warn!(status, message = %message, "Request failed");
    ApiError::request(status, message)
}
