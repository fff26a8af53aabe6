use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Preview metadata returned by `GET /api/metadata`.
///
/// All fields except `url` are optional — a page may have none of the tags
/// we look for. Absent fields are omitted from the JSON body entirely
/// rather than serialized as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreviewDto {
    /// Normalized echo of the requested target URL.
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Always an absolute URL when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Always an absolute URL when present; defaults to the origin's
    /// `/favicon.ico` when the page declares no icon link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    /// Set when the upstream fetch failed or returned unusable content.
    /// The echoed `url` is still present alongside it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PreviewDto {
    /// Result carrying only the echoed URL and a failure description.
    pub fn error(url: String, message: String) -> Self {
        PreviewDto {
            url,
            title: None,
            description: None,
            image: None,
            favicon: None,
            error: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let dto = PreviewDto {
            url: "https://example.com/".into(),
            title: Some("T".into()),
            description: None,
            image: None,
            favicon: None,
            error: None,
        };
        let value = serde_json::to_value(&dto).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("url"));
        assert!(obj.contains_key("title"));
        assert!(!obj.contains_key("description"));
        assert!(!obj.contains_key("error"));
    }

    #[test]
    fn error_result_carries_url_and_message_only() {
        let dto = PreviewDto::error("https://example.com/".into(), "Upstream responded 404".into());
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["url"], "https://example.com/");
        assert_eq!(value["error"], "Upstream responded 404");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn full_result_serializes_every_field() {
        let dto = PreviewDto {
            url: "https://example.com/".into(),
            title: Some("T".into()),
            description: Some("D".into()),
            image: Some("https://example.com/i.png".into()),
            favicon: Some("https://example.com/favicon.ico".into()),
            error: None,
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 5);
        assert_eq!(value["favicon"], "https://example.com/favicon.ico");
    }
}
