//! Result-page metadata extraction.
//!
//! Fetches a hit's URL and harvests its `<meta>` tags: every element
//! carrying both a `name` and a `content` attribute lands in the mapping.
//! When a page repeats a name, the later occurrence overwrites the
//! earlier one.

use crate::error::GleanError;
use reqwest::header::CONTENT_TYPE;
use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

/// Content types accepted for meta-tag extraction.
const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Fetch `url` and return its meta-tag mapping.
///
/// # Errors
///
/// Returns [`GleanError::Parse`] for an unparseable URL and
/// [`GleanError::Http`] for transport failures, non-success statuses, and
/// non-HTML content. Callers treat every error as the loss of this one
/// hit; nothing here panics.
pub async fn fetch_meta_tags(
    client: &reqwest::Client,
    url: &str,
) -> Result<HashMap<String, String>, GleanError> {
    let parsed = Url::parse(url).map_err(|e| GleanError::Parse(format!("invalid result URL {url}: {e}")))?;

    let response = client
        .get(parsed)
        .header("Accept", "text/html")
        .send()
        .await
        .map_err(|e| GleanError::Http(format!("page request failed: {e}")))?
        .error_for_status()
        .map_err(|e| GleanError::Http(format!("page HTTP error: {e}")))?;

    if let Some(content_type) = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        if !HTML_CONTENT_TYPES.iter().any(|allowed| allowed.eq_ignore_ascii_case(ct)) {
            return Err(GleanError::Http(format!("unsupported content type: {ct}")));
        }
    }

    let body = response
        .text()
        .await
        .map_err(|e| GleanError::Http(format!("page read failed: {e}")))?;

    let tags = extract_meta_tags(&body);
    tracing::trace!(url, count = tags.len(), "meta tags extracted");
    Ok(tags)
}

/// Extract the meta-tag mapping from raw HTML.
///
/// Only `<meta>` elements with both `name` and `content` attributes
/// contribute; duplicates resolve last-write-wins. Extracted as a
/// separate function for testability with fixture HTML.
pub fn extract_meta_tags(html: &str) -> HashMap<String, String> {
    let document = Html::parse_document(html);
    let Ok(meta_sel) = Selector::parse("meta") else {
        return HashMap::new();
    };

    let mut tags = HashMap::new();
    for element in document.select(&meta_sel) {
        let (Some(name), Some(content)) = (element.value().attr("name"), element.value().attr("content"))
        else {
            continue;
        };
        tags.insert(name.to_string(), content.to_string());
    }
    tags
}
