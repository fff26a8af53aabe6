// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::get,
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::net::SocketAddr;
use tower::ServiceExt;
use utoipa::OpenApi;

use unfurl_server::{
    handlers,
    handlers::metadata::{FETCH_TIMEOUT, USER_AGENT},
    state::AppState,
    ApiDoc,
};

/// Build the application router with the same routes and state as `main`.
///
/// The Prometheus recorder is process-global and can only be installed once,
/// so the metrics layer stays out of the test router.
pub fn create_test_app() -> Router {
    let http_client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client");
    let state = AppState { http_client };
    Router::new()
        .route("/", get(handlers::index_page))
        .route("/health", get(handlers::health_check))
        .route("/api/metadata", get(handlers::metadata::get_metadata))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .with_state(state)
}

/// Build a `/api/metadata` URI with the target percent-encoded.
///
/// Only `:` and `/` need encoding for the URLs the tests use.
pub fn metadata_uri(target: &str) -> String {
    format!(
        "/api/metadata?url={}",
        target.replace(':', "%3A").replace('/', "%2F")
    )
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// GET a URI and return the body as text, for non-JSON routes.
pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// ── Stub upstream helpers ────────────────────────────────────────────────────

/// Serve `router` on an ephemeral local port and return its address.
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub upstream");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// An upstream that answers every request with a fixed status, content type
/// and body.
pub fn upstream_with(status: StatusCode, content_type: &'static str, body: &'static str) -> Router {
    Router::new().fallback(move || async move {
        (status, [(header::CONTENT_TYPE, content_type)], body)
    })
}

/// An upstream that serves the given HTML document on every path.
pub fn upstream_html(body: &'static str) -> Router {
    upstream_with(StatusCode::OK, "text/html; charset=utf-8", body)
}
