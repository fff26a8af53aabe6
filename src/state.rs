use reqwest::Client;

/// Shared application state passed to all handlers.
/// The HTTP client is built once at startup (timeout and User-Agent baked
/// in) rather than per request; it pools connections internally and is
/// cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub http_client: Client,
}
