use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-level failures: the caller's input was unusable before any fetch
/// happened. These are the only errors that surface as non-200 responses.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing url parameter")]
    MissingParameter,

    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Internal server error")]
    Internal,
}

/// Failures discovered after URL validation. These never surface as
/// transport errors — the handler renders them into the `error` field of a
/// 200 response so callers always receive a well-formed payload.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Upstream responded {0}")]
    UpstreamStatus(u16),

    #[error("Not an HTML page")]
    NotHtml,

    #[error("{0}")]
    Transport(String),
}

/// Network, DNS, TLS, and timeout failures all arrive as `reqwest::Error`;
/// collapse them into one category carrying the underlying message.
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = match self {
            AppError::MissingParameter => (StatusCode::BAD_REQUEST, "Missing url parameter".into()),
            AppError::InvalidUrl => (StatusCode::BAD_REQUEST, "Invalid URL".into()),
            AppError::Internal => {
                tracing::error!("Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
