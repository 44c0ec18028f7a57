#![allow(dead_code)]

//! Stub Resumatch backend for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use resumatch_core::domain::TokenPair;
use resumatch_infra::{AuthClient, ClientConfig, InMemorySessionStore, ResumatchApi};

pub const INVALID_TOKEN_DETAIL: &str = "Given token not valid for any token type";

/// How the stub answers POST /token/refresh/.
#[derive(Debug, Clone)]
pub enum RefreshBehavior {
    /// 200 `{access}`; the new token becomes the valid one.
    Issue(String),
    /// 200 `{access, refresh}`.
    Rotate { access: String, refresh: String },
    /// Non-2xx with a `detail` body.
    Reject(u16),
}

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Vec<String>,
    pub idempotency_key: Option<String>,
}

pub struct StubState {
    pub valid_access: Mutex<String>,
    pub refresh_behavior: Mutex<RefreshBehavior>,
    pub refresh_delay: Mutex<Duration>,
    pub refresh_calls: AtomicUsize,
    pub seen: Mutex<Vec<SeenRequest>>,
    pub refresh_bodies: Mutex<Vec<Value>>,
    pub uploads: Mutex<Vec<(String, Option<String>, Option<String>, usize)>>,
}

impl StubState {
    pub fn new(valid_access: &str) -> Self {
        Self {
            valid_access: Mutex::new(valid_access.to_string()),
            refresh_behavior: Mutex::new(RefreshBehavior::Issue("fresh".to_string())),
            refresh_delay: Mutex::new(Duration::ZERO),
            refresh_calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            refresh_bodies: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    /// Requests seen for a path, in arrival order.
    pub async fn seen_for(&self, path: &str) -> Vec<SeenRequest> {
        self.seen
            .lock()
            .await
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

pub struct StubBackend {
    pub base_url: String,
    pub state: Arc<StubState>,
}

impl StubBackend {
    /// Start a backend that accepts `valid_access` as the current token.
    pub async fn start(valid_access: &str) -> Self {
        let state = Arc::new(StubState::new(valid_access));

        let app = Router::new()
            .route("/api/login/", post(login))
            .route("/api/token/refresh/", post(refresh))
            .route("/api/register", post(register))
            .route("/api/resumes/", get(list_resumes))
            .route("/api/resumes/upload/", post(upload_resume))
            .route("/api/resumes/:id/", get(get_resume))
            .route("/api/ask/", post(ask))
            .route("/api/jobs/", post(create_job))
            .route("/api/jobs/list/", get(list_jobs))
            .route("/api/jobs/:id/match/", post(match_job))
            .route("/api/broken/", get(broken))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default().with_base_url(self.base_url.clone())
    }

    /// Client whose session holds `pair`, or nothing.
    pub fn client(&self, pair: Option<TokenPair>) -> (AuthClient, Arc<InMemorySessionStore>) {
        let store = Arc::new(match pair {
            Some(pair) => InMemorySessionStore::with_pair(pair),
            None => InMemorySessionStore::new(),
        });
        let client = AuthClient::new(self.config(), store.clone()).unwrap();
        (client, store)
    }

    pub fn api(&self, pair: Option<TokenPair>) -> (ResumatchApi, Arc<InMemorySessionStore>) {
        let (client, store) = self.client(pair);
        (ResumatchApi::new(client), store)
    }
}

/// Base URL on which nothing listens.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

async fn record(State(state): State<Arc<StubState>>, request: Request, next: Next) -> Response {
    let headers = request.headers();
    let seen = SeenRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(String::from),
        authorization: headers
            .get_all(header::AUTHORIZATION)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect(),
        idempotency_key: headers
            .get("idempotency-key")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    };
    state.seen.lock().await.push(seen);
    next.run(request).await
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

async fn authorize(state: &StubState, headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", state.valid_access.lock().await);
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(detail(StatusCode::UNAUTHORIZED, INVALID_TOKEN_DETAIL)),
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if username == "admin123" && password == "admin123" {
        Json(json!({ "access": "a", "refresh": "r" })).into_response()
    } else if username == "garbled" {
        (StatusCode::BAD_REQUEST, "<html>bad</html>").into_response()
    } else {
        detail(
            StatusCode::UNAUTHORIZED,
            "No active account found with the given credentials",
        )
    }
}

async fn refresh(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    state.refresh_bodies.lock().await.push(body);

    let delay = *state.refresh_delay.lock().await;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let behavior = state.refresh_behavior.lock().await.clone();
    match behavior {
        RefreshBehavior::Issue(access) => {
            *state.valid_access.lock().await = access.clone();
            Json(json!({ "access": access })).into_response()
        }
        RefreshBehavior::Rotate { access, refresh } => {
            *state.valid_access.lock().await = access.clone();
            Json(json!({ "access": access, "refresh": refresh })).into_response()
        }
        RefreshBehavior::Reject(status) => detail(
            StatusCode::from_u16(status).unwrap(),
            "Token is invalid or expired",
        ),
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    match body["username"].as_str() {
        Some("taken") => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "message": "Username taken" } })),
        )
            .into_response(),
        Some("admin123") => (
            StatusCode::CREATED,
            Json(json!({ "id": 1, "username": "admin123", "role": body["role"] })),
        )
            .into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn list_resumes(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }

    let resumes = json!([
        { "id": 1, "filename": "alice.pdf", "status": "processed" },
        { "id": 2, "filename": "bob.docx", "status": "pending" }
    ]);
    if params.get("q").map(String::as_str) == Some("bare") {
        Json(resumes).into_response()
    } else {
        Json(json!({ "count": 2, "results": resumes })).into_response()
    }
}

async fn get_resume(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }
    if id == "404" {
        return detail(StatusCode::NOT_FOUND, "Not found.");
    }

    Json(json!({
        "id": id,
        "filename": format!("cv-{id}.pdf"),
        "status": "processed",
        "chunks": [
            { "id": 10, "chunk_text": "Senior Rust engineer" },
            { "id": 11, "chunk_text": "Led a team of five" }
        ]
    }))
    .into_response()
}

async fn upload_resume(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }

    let mut empty_reply = false;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
        empty_reply |= file_name.as_deref() == Some("no-body.pdf");
        state
            .uploads
            .lock()
            .await
            .push((name, file_name, content_type, size));
    }

    if empty_reply {
        return StatusCode::CREATED.into_response();
    }

    (
        StatusCode::CREATED,
        Json(json!({ "id": 7, "filename": "cv.pdf", "status": "uploaded" })),
    )
        .into_response()
}

async fn ask(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }

    let k = body["k"].as_u64().unwrap_or(5) as usize;
    let answers: Vec<Value> = [("1", 0.42), ("2", 0.91), ("404", 0.67)]
        .iter()
        .take(k)
        .map(|(id, score)| {
            json!({
                "resume_id": id,
                "score": score,
                "evidence": [{ "text": format!("matched {}", body["query"].as_str().unwrap_or_default()) }]
            })
        })
        .collect();

    Json(json!({ "answers": answers })).into_response()
}

async fn create_job(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }
    if body["title"].as_str() == Some("Server Rejects") {
        return detail(StatusCode::BAD_REQUEST, "Job title required");
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "id": 5,
            "title": body["title"],
            "description": body["description"],
            "requirements": body["requirements"]
        })),
    )
        .into_response()
}

async fn list_jobs(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }
    Json(json!({ "count": 0 })).into_response()
}

async fn match_job(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }
    if id == "404" {
        return detail(StatusCode::NOT_FOUND, "Job not found");
    }

    let top_n = body["top_n"].as_u64().unwrap_or(10);
    Json(json!({
        "matches": [
            { "resume_id": 2, "score": 0.8, "evidence": [{ "text": "Rust" }] }
        ],
        "top_n": top_n
    }))
    .into_response()
}

async fn broken(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers).await {
        return denied;
    }
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").into_response()
}
