//! Link metadata extraction service: fetch a page and return best-effort
//! Open Graph preview fields within a bounded time.

use utoipa::OpenApi;

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod state;

/// OpenAPI description of the HTTP surface, served at
/// `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "unfurl-server",
        description = "Link metadata extraction API: validate a URL, fetch it within a bounded time, and return preview fields"
    ),
    paths(handlers::metadata::get_metadata),
    components(schemas(models::PreviewDto))
)]
pub struct ApiDoc;
