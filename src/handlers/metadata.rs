use std::time::Duration;

use axum::extract::{Query, State};
use axum::Json;
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use url::Url;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult, FetchError};
use crate::extract::extract_metadata;
use crate::models::PreviewDto;
use crate::state::AppState;

/// Budget for the whole upstream request, measured from fetch start. A slow
/// page degrades to an error result, never a hung caller.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(8);
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; UnfurlBot/1.0)";

// ── Query params ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MetadataQuery {
    /// Candidate target URL. Required; must be an absolute URL.
    pub url: Option<String>,
}

// ── Validation ─────────────────────────────────────────────────────────────

/// Validate the raw `url` parameter into a fetchable target.
///
/// Absence and emptiness are reported separately from syntax failures so the
/// caller can tell "you sent nothing" from "you sent garbage". A parsed URL
/// must carry a host; host-less forms like `mailto:` are rejected here,
/// while non-http schemes with a host pass through and fail at the fetch
/// step instead.
pub fn validate_target(raw: Option<&str>) -> Result<Url, AppError> {
    let raw = raw
        .filter(|value| !value.is_empty())
        .ok_or(AppError::MissingParameter)?;

    let target = Url::parse(raw).map_err(|_| AppError::InvalidUrl)?;
    if !target.has_host() {
        return Err(AppError::InvalidUrl);
    }
    Ok(target)
}

// ── Fetch + gate ───────────────────────────────────────────────────────────

/// Retrieve the HTML document at `target`, or describe why it cannot be
/// previewed. The shared client enforces `FETCH_TIMEOUT` and cancels the
/// in-flight request when the budget expires; an expired budget surfaces as
/// a `Transport` error like any other network failure.
pub async fn fetch_document(client: &reqwest::Client, target: &Url) -> Result<String, FetchError> {
    let response = client
        .get(target.as_str())
        // Intermediate caches must revalidate; there is no local response
        // cache either.
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::UpstreamStatus(status.as_u16()));
    }

    if !is_html(content_type(&response)) {
        return Err(FetchError::NotHtml);
    }

    Ok(response.text().await?)
}

/// `content-type` header value, or empty string when missing or unreadable.
fn content_type(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// The gate only asks that the media type contain the HTML token; parameters
/// like `charset` may surround it.
fn is_html(content_type: &str) -> bool {
    content_type.contains("text/html")
}

// ── Handler ────────────────────────────────────────────────────────────────

/// GET /api/metadata?url=<encoded-url>
///
/// Fetches the target page and answers with best-effort preview fields.
/// Failures found after validation (upstream status, content type, network,
/// timeout) are embedded in the payload as `error` with HTTP 200, so the
/// caller always receives well-formed JSON to render and never branches on
/// transport status. Only a missing or unparseable `url` is a 400.
#[utoipa::path(
    get,
    path = "/api/metadata",
    params(MetadataQuery),
    responses(
        (status = 200, description = "Preview fields, or the echoed URL plus an `error` describing the upstream failure", body = PreviewDto),
        (status = 400, description = "`url` parameter missing, empty, or not an absolute URL")
    )
)]
pub async fn get_metadata(
    State(state): State<AppState>,
    Query(params): Query<MetadataQuery>,
) -> AppResult<Json<PreviewDto>> {
    let target = validate_target(params.url.as_deref())?;

    match fetch_document(&state.http_client, &target).await {
        Ok(html) => Ok(Json(extract_metadata(&html, &target))),
        Err(e) => {
            tracing::warn!(error = %e, url = %target, "Preview fetch degraded to error result");
            Ok(Json(PreviewDto::error(target.to_string(), e.to_string())))
        }
    }
}

// ── Unit tests ─────────────────────────────────────────────────────────────
