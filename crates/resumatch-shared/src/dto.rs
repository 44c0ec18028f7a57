//! Data Transfer Objects - request/response bodies for the backend API.

use serde::{Deserialize, Serialize};

/// POST /login/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login: both tokens.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
}

/// POST /token/refresh/
#[derive(Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Successful refresh. `refresh` is only present when the server rotates it.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// POST /register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// POST /ask/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
    pub k: usize,
}

/// POST /jobs/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
}

/// POST /jobs/{id}/match/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub top_n: usize,
}

/// `{ "results": [...] }` envelope. A missing `results` reads as empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// List endpoints answer either with an envelope or with a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    Bare(Vec<T>),
    Envelope(ResultsEnvelope<T>),
}

impl<T> ListBody<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) => items,
            ListBody::Envelope(envelope) => envelope.results,
        }
    }
}

/// Response of POST /ask/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswersBody<T> {
    #[serde(default = "Vec::new")]
    pub answers: Vec<T>,
}

/// Response of POST /jobs/{id}/match/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesBody<T> {
    #[serde(default = "Vec::new")]
    pub matches: Vec<T>,
}
