pub mod metadata;

use axum::{http::StatusCode, response::Html, Json};
use serde_json::{json, Value};

/// Liveness probe. The service holds no connections or state worth probing,
/// so this reports ok whenever the process is up.
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "unfurl-server",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// The presentation page: a form that calls `/api/metadata` and renders the
/// returned fields client-side. Embedded at compile time so the binary is
/// self-contained.
pub async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
