use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// A request as the mock server saw it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub fields: HashMap<String, String>,
    pub client_header: Option<String>,
    pub uid_header: Option<String>,
}

impl RecordedCall {
    pub fn identity(&self) -> Option<&str> {
        self.fields.get("GU_U").map(String::as_str)
    }
}

#[derive(Clone, Default)]
pub struct AppState {
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    next_comment_id: Arc<AtomicU64>,
}

impl AppState {
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }
}

const FIRST_COMMENT_ID: u64 = 1000;

pub fn app() -> Router {
    app_with_state(AppState::default())
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/discussion/{discussion_id}/comment.json", post(post_comment))
        .route(
            "/discussion/{discussion_id}/comment/{comment_id}/reply.json",
            post(post_reply),
        )
        .route("/comment/{id}/recommend", post(comment_action))
        .route("/comment/{id}/highlight", post(comment_action))
        .route("/comment/{id}/unhighlight", post(comment_action))
        .route("/profile/me", get(get_me))
        .route("/profile/{id}", get(get_profile))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

async fn post_comment(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(_discussion_id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    created_comment(&state, method, uri, headers, fields).await
}

async fn post_reply(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path((_discussion_id, _comment_id)): Path<(String, u64)>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    created_comment(&state, method, uri, headers, fields).await
}

async fn created_comment(
    state: &AppState,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    fields: HashMap<String, String>,
) -> Response {
    if let Err(rejection) = record(state, &method, &uri, &headers, fields.clone()).await {
        return rejection;
    }
    if !fields.get("body").is_some_and(|b| !b.trim().is_empty()) {
        return respond(
            None,
            StatusCode::BAD_REQUEST,
            json!({"status": "error", "errorCode": "EMPTY_COMMENT_BODY"}),
        );
    }
    let id = FIRST_COMMENT_ID + state.next_comment_id.fetch_add(1, Ordering::SeqCst);
    respond(None, StatusCode::OK, json!({"status": "ok", "message": id.to_string()}))
}

async fn comment_action(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(_id): Path<u64>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = record(&state, &method, &uri, &headers, fields).await {
        return rejection;
    }
    respond(None, StatusCode::OK, json!({"status": "ok", "message": "done"}))
}

async fn get_me(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(mut fields): Query<HashMap<String, String>>,
) -> Response {
    let callback = fields.remove("callback");
    if let Err(rejection) = record(&state, &method, &uri, &headers, fields.clone()).await {
        return rejection;
    }
    match fields.get("GU_U") {
        Some(_) => respond(callback.as_deref(), StatusCode::OK, profile("1", "Signed In")),
        None => respond(
            callback.as_deref(),
            StatusCode::UNAUTHORIZED,
            json!({"status": "error", "errorCode": "NOT_SIGNED_IN"}),
        ),
    }
}

async fn get_profile(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(mut fields): Query<HashMap<String, String>>,
) -> Response {
    let callback = fields.remove("callback");
    if let Err(rejection) = record(&state, &method, &uri, &headers, fields).await {
        return rejection;
    }
    match id.as_str() {
        "55" => respond(callback.as_deref(), StatusCode::OK, profile("55", "Test User")),
        _ => respond(
            callback.as_deref(),
            StatusCode::NOT_FOUND,
            json!({"status": "error", "errorCode": "USER_NOT_FOUND"}),
        ),
    }
}

/// Store the call, rejecting it when the client header is missing.
async fn record(
    state: &AppState,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    fields: HashMap<String, String>,
) -> Result<(), Response> {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let call = RecordedCall {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        fields,
        client_header: header_value("gu-client"),
        uid_header: header_value("d2-x-uid"),
    };
    tracing::info!(method = %call.method, path = %call.path, "recorded call");
    let missing_client = call.client_header.is_none();
    state.calls.write().await.push(call);

    if missing_client {
        return Err(respond(
            None,
            StatusCode::BAD_REQUEST,
            json!({"status": "error", "errorCode": "MISSING_CLIENT_HEADER"}),
        ));
    }
    Ok(())
}

fn profile(user_id: &str, display_name: &str) -> Value {
    json!({
        "status": "ok",
        "userProfile": {
            "userId": user_id,
            "displayName": display_name,
            "webUrl": format!("https://profile.example.com/user/id/{user_id}"),
            "badge": []
        }
    })
}

/// JSON, or JSONP when the caller named a callback.
fn respond(callback: Option<&str>, status: StatusCode, body: Value) -> Response {
    match callback {
        Some(callback) => (
            status,
            [(header::CONTENT_TYPE, "application/javascript")],
            format!("{callback}({body});"),
        )
            .into_response(),
        None => (status, [(header::CONTENT_TYPE, "application/json")], body.to_string()).into_response(),
    }
}
