//! Search response parsing.
//!
//! The search API answers with structured markup: a top-level `response`
//! element holding either an `error` element or grouped results
//! (`group` elements wrapping `doc` entries with a `url` and optional
//! `passages`). The walk uses scraper's lenient parser and CSS selectors,
//! the same machinery used for page metadata; the lowercase element names
//! of the wire format select cleanly through it.

use crate::error::GleanError;
use crate::types::Hit;
use scraper::{Html, Selector};

/// Parse one raw search response body into its ordered hit list.
///
/// An `error` element anywhere in the response marks the entire response
/// as failed, taking precedence over any result data present in the same
/// document. A response with zero groups is a valid empty outcome. Hits
/// are returned in document order; a `doc` without a passage still yields
/// its URL with an empty description.
///
/// # Errors
///
/// Returns [`GleanError::Parse`] when the body has no `response` element,
/// and [`GleanError::Search`] when the API reported a domain-level error.
pub fn parse_search_response(body: &str) -> Result<Vec<Hit>, GleanError> {
    let document = Html::parse_document(body);

    let response_sel = Selector::parse("response")
        .map_err(|e| GleanError::Parse(format!("invalid response selector: {e:?}")))?;
    let error_sel = Selector::parse("response error")
        .map_err(|e| GleanError::Parse(format!("invalid error selector: {e:?}")))?;
    let group_sel = Selector::parse("response group")
        .map_err(|e| GleanError::Parse(format!("invalid group selector: {e:?}")))?;
    let doc_sel = Selector::parse("doc")
        .map_err(|e| GleanError::Parse(format!("invalid doc selector: {e:?}")))?;
    let url_sel = Selector::parse("url")
        .map_err(|e| GleanError::Parse(format!("invalid url selector: {e:?}")))?;
    let passage_sel = Selector::parse("passage")
        .map_err(|e| GleanError::Parse(format!("invalid passage selector: {e:?}")))?;

    if document.select(&response_sel).next().is_none() {
        return Err(GleanError::Parse("missing response element".into()));
    }

    // A reported error invalidates the whole response, even when result
    // data sits alongside it.
    if let Some(error_el) = document.select(&error_sel).next() {
        let message = error_el.text().collect::<String>().trim().to_string();
        return Err(GleanError::Search(if message.is_empty() {
            "unspecified error".into()
        } else {
            message
        }));
    }

    let mut hits = Vec::new();
    for group in document.select(&group_sel) {
        for doc in group.select(&doc_sel) {
            let url = match doc.select(&url_sel).next() {
                Some(el) => el.text().collect::<String>().trim().to_string(),
                None => continue,
            };
            if url.is_empty() {
                continue;
            }

            let description = doc
                .select(&passage_sel)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
                .unwrap_or_default();

            hits.push(Hit { url, description });
        }
    }

    tracing::debug!(count = hits.len(), "search response parsed");
    Ok(hits)
}
