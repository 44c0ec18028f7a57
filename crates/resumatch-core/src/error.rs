//! Client-level error types.

use thiserror::Error;

use crate::ports::{HistoryError, SessionError};

/// Message used when no response was received at all.
pub const TRANSPORT_ERROR_MESSAGE: &str = "Network error";

/// The single error shape exposed to callers of the client.
///
/// Every variant displays as a human-readable message that a front end can
/// show as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status (after any refresh-and-retry).
    #[error("{message}")]
    Request { status: u16, message: String },

    /// No response was received (connect failure, timeout, broken body).
    #[error("{0}")]
    Transport(String),

    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// A 2xx response whose body did not match the endpoint contract.
    #[error("{0}")]
    Decode(String),

    #[error("Session storage failed: {0}")]
    Session(#[from] SessionError),

    #[error("Search history storage failed: {0}")]
    History(#[from] HistoryError),
}

impl ApiError {
    pub fn request(status: u16, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    pub fn transport() -> Self {
        Self::Transport(TRANSPORT_ERROR_MESSAGE.to_string())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// The human-readable message for display.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status of a server-reported failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the session is gone and the user has to log in again.
    pub fn requires_login(&self) -> bool {
        self.status() == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_displays_message_only() {
        let err = ApiError::request(400, "Job title required");
        assert_eq!(err.message(), "Job title required");
        assert_eq!(err.status(), Some(400));
        assert!(!err.requires_login());
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = ApiError::transport();
        assert_eq!(err.message(), TRANSPORT_ERROR_MESSAGE);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_unauthorized_requires_login() {
        assert!(ApiError::request(401, "Request failed").requires_login());
    }
}
