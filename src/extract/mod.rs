//! Pattern-based metadata extraction.
//!
//! Ordered regex fallback chains over the raw document text — deliberately
//! no DOM construction, so malformed markup degrades to "no match" instead
//! of failing the whole request. Only the first occurrence of each tag is
//! consulted.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::models::PreviewDto;

// ── Patterns ───────────────────────────────────────────────────────────────

/// The two attribute orders a tag is matched in: key attribute before
/// `content`, and the reverse. Quotes may be single or double; the captured
/// value must be non-empty and may not contain either quote character.
fn meta_patterns(attr: &str, key: &str) -> [Regex; 2] {
    [
        Regex::new(&format!(
            r#"(?i)<meta[^>]*\s{attr}=["']{key}["'][^>]*\scontent=["']([^"']+)["']"#
        ))
        .unwrap(),
        Regex::new(&format!(
            r#"(?i)<meta[^>]*\scontent=["']([^"']+)["'][^>]*\s{attr}=["']{key}["']"#
        ))
        .unwrap(),
    ]
}

static OG_TITLE: Lazy<[Regex; 2]> = Lazy::new(|| meta_patterns("property", "og:title"));
static TWITTER_TITLE: Lazy<[Regex; 2]> = Lazy::new(|| meta_patterns("name", "twitter:title"));

static OG_DESCRIPTION: Lazy<[Regex; 2]> =
    Lazy::new(|| meta_patterns("property", "og:description"));
static META_DESCRIPTION: Lazy<[Regex; 2]> = Lazy::new(|| meta_patterns("name", "description"));
static TWITTER_DESCRIPTION: Lazy<[Regex; 2]> =
    Lazy::new(|| meta_patterns("name", "twitter:description"));

static OG_IMAGE: Lazy<[Regex; 2]> = Lazy::new(|| meta_patterns("property", "og:image"));
static TWITTER_IMAGE: Lazy<[Regex; 2]> = Lazy::new(|| meta_patterns("name", "twitter:image"));

static TITLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").unwrap());

static ICON_LINK: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r#"(?i)<link[^>]*\srel=["'](?:shortcut )?icon["'][^>]*\shref=["']([^"']+)["']"#)
            .unwrap(),
        Regex::new(r#"(?i)<link[^>]*\shref=["']([^"']+)["'][^>]*\srel=["'](?:shortcut )?icon["']"#)
            .unwrap(),
    ]
});

static ABSOLUTE_HTTP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://").unwrap());

// ── Extraction ─────────────────────────────────────────────────────────────

/// Extract preview fields from `html`, resolving relative references against
/// the origin of `target`. Pure: the same input always yields the same
/// output, and nothing here performs I/O.
pub fn extract_metadata(html: &str, target: &Url) -> PreviewDto {
    let title = tag_value(html, &OG_TITLE)
        .or_else(|| tag_value(html, &TWITTER_TITLE))
        .or_else(|| capture_trimmed(&TITLE_TAG, html));

    let description = tag_value(html, &OG_DESCRIPTION)
        .or_else(|| tag_value(html, &META_DESCRIPTION))
        .or_else(|| tag_value(html, &TWITTER_DESCRIPTION));

    let image = tag_value(html, &OG_IMAGE)
        .or_else(|| tag_value(html, &TWITTER_IMAGE))
        .and_then(|raw| resolve_image(raw, target));

    let favicon = resolve_favicon(html, target);

    PreviewDto {
        url: target.to_string(),
        title,
        description,
        image,
        favicon: Some(favicon),
        error: None,
    }
}

/// First non-empty match across both attribute orders, trimmed.
fn tag_value(html: &str, patterns: &[Regex; 2]) -> Option<String> {
    patterns.iter().find_map(|re| capture_trimmed(re, html))
}

fn capture_trimmed(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

// ── Reference resolution ───────────────────────────────────────────────────

/// A raw image candidate that is not already an absolute http(s) URL is
/// resolved against the target's origin. A reference that will not resolve
/// is dropped — a broken image URL is worse than no image.
fn resolve_image(raw: String, target: &Url) -> Option<String> {
    if ABSOLUTE_HTTP.is_match(&raw) {
        return Some(raw);
    }
    let origin = target.origin().ascii_serialization();
    Url::parse(&origin)
        .and_then(|base| base.join(&raw))
        .map(|resolved| resolved.to_string())
        .ok()
}

/// Favicon always resolves to something: the declared icon link if present,
/// else `/favicon.ico`, both against the target origin; if even that
/// resolution fails, the literal origin string with `/favicon.ico` appended.
fn resolve_favicon(html: &str, target: &Url) -> String {
    let origin = target.origin().ascii_serialization();
    let raw = tag_value(html, &ICON_LINK).unwrap_or_else(|| "/favicon.ico".to_string());
    Url::parse(&origin)
        .and_then(|base| base.join(&raw))
        .map(|resolved| resolved.to_string())
        .unwrap_or_else(|_| format!("{origin}/favicon.ico"))
}

// ── Unit tests ─────────────────────────────────────────────────────────────
