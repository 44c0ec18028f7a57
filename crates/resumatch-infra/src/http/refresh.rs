//! Access token refresh.

use tracing::{debug, info, warn};

use resumatch_core::ApiError;
use resumatch_core::domain::TokenPair;
use resumatch_shared::dto::{RefreshRequest, RefreshResponse};

use super::client::AuthClient;
use super::request::PendingRequest;

/// Result of a refresh attempt that did not fail in transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new access token was stored.
    Refreshed(String),
    /// No refresh is possible: no refresh token, or the server rejected it
    /// (in which case the session has been cleared).
    Unavailable,
}

impl AuthClient {
    /// Obtain a new access token with the stored refresh token.
    ///
    /// The credential pair is either updated or cleared as a whole. Transport
    /// failures are returned as errors and leave the session untouched.
    pub async fn refresh(&self) -> Result<RefreshOutcome, ApiError> {
        let Some(refresh) = self.session.refresh_token().await? else {
            debug!("No refresh token stored");
            return Ok(RefreshOutcome::Unavailable);
        };

        let request = PendingRequest::post(self.endpoint("token/refresh/"))
            .json(&RefreshRequest { refresh })?;
        let response = self.send_public(request).await?;
        let status = response.status();

        if !status.is_success() {
            warn!(status = status.as_u16(), "Refresh token rejected, clearing session");
            self.session.clear().await?;
            return Ok(RefreshOutcome::Unavailable);
        }

        let body: RefreshResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Unreadable refresh response");
                RefreshResponse::default()
            }
        };

        let Some(access) = body.access.filter(|a| !a.is_empty()) else {
            warn!("Refresh response carried no access token, clearing session");
            self.session.clear().await?;
            return Ok(RefreshOutcome::Unavailable);
        };

        match body.refresh.filter(|r| !r.is_empty()) {
            // Rotating servers hand out a new refresh token with every refresh
            Some(rotated) => {
                self.session
                    .store_pair(&TokenPair::new(access.clone(), rotated))
                    .await?
            }
            None => self.session.store_access(&access).await?,
        }

        info!("Access token refreshed");
        Ok(RefreshOutcome::Refreshed(access))
    }

    /// Single-flight refresh for a request whose token `rejected` got a 401.
    ///
    /// Callers queue on the refresh guard. Once inside, a caller whose
    /// rejected token has already been replaced (or cleared) by an earlier
    /// holder takes the current state instead of refreshing again.
    pub(super) async fn refresh_after_unauthorized(
        &self,
        rejected: Option<&str>,
    ) -> Result<RefreshOutcome, ApiError> {
        let _guard = self.refresh_guard.lock().await;

        let current = self.session.access_token().await?;
        if current.as_deref() != rejected {
            debug!("Session changed while waiting, skipping refresh");
            return Ok(match current {
                Some(token) => RefreshOutcome::Refreshed(token),
                None => RefreshOutcome::Unavailable,
            });
        }

        self.refresh().await
    }
}
