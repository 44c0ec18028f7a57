//! Error bodies returned by the backend.
//!
//! Failure responses follow the REST framework convention of a `detail`
//! string (the same field RFC 7807 problem details use). Registration errors
//! nest their message under `error.message` instead.

use serde::Deserialize;

/// Message used when a failure body carries no readable `detail`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

/// Failure body. Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,

    #[serde(default)]
    pub error: Option<NestedError>,
}

/// `{ "error": { "message": ... } }` shape used by registration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NestedError {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parse a failure body. Anything that is not a JSON object of the
    /// expected shape yields `None`.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// Non-empty `detail`, if present.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref().filter(|d| !d.is_empty())
    }

    /// Non-empty `error.message`, if present.
    pub fn nested_message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .filter(|m| !m.is_empty())
    }
}

/// Attempt to read `detail` from a failure body.
///
/// `None` means the caller should fall back to [`FALLBACK_ERROR_MESSAGE`]
/// (or an endpoint-specific message): the body was not JSON, was not an
/// object, or had no usable `detail`.
pub fn detail_message(body: &[u8]) -> Option<String> {
    ErrorBody::parse(body).and_then(|b| b.detail().map(String::from))
}
