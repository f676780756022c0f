//! Search API client: one request per term.
//!
//! Talks to a Yandex.XML-style search endpoint. Each request carries the
//! account identifier, the API key, the query, a fixed relevance ordering,
//! and flat grouping directives with bounded group and document counts.
//! The raw response body is handed to [`crate::response`] for parsing.

use crate::config::Credentials;
use crate::error::GleanError;

/// Default search endpoint (Yandex.XML).
pub const DEFAULT_ENDPOINT: &str = "https://yandex.ru/search/xml";

/// Relevance ordering for returned documents.
const SORT_MODE: &str = "rlv";

/// Flat grouping: ten groups per page, one document per group.
const GROUPING: &str = "attr=\"\".mode=flat.groups-on-page=10.docs-in-group=1";

/// Client for the remote search API.
///
/// One instance is cloned into every dispatch worker; credentials travel
/// with the client as an explicit value.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
}

impl SearchClient {
    /// Create a client that sends requests to `endpoint` authenticated
    /// with `credentials`.
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            credentials,
        }
    }

    /// Issue one search request for `term` and return the raw response
    /// body.
    ///
    /// # Errors
    ///
    /// Returns [`GleanError::Http`] if the request fails, times out, or
    /// the server answers with a non-success status. Domain-level errors
    /// inside a successful response are the parser's concern.
    pub async fn search(&self, term: &str) -> Result<String, GleanError> {
        tracing::trace!(term, "search request");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("user", self.credentials.user.as_str()),
                ("key", self.credentials.key.as_str()),
                ("query", term),
                ("sortby", SORT_MODE),
                ("groupby", GROUPING),
            ])
            .send()
            .await
            .map_err(|e| GleanError::Http(format!("search request failed: {e}")))?
            .error_for_status()
            .map_err(|e| GleanError::Http(format!("search HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| GleanError::Http(format!("search response read failed: {e}")))?;

        tracing::trace!(term, bytes = body.len(), "search response received");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> SearchClient {
        SearchClient::new(
            reqwest::Client::new(),
            DEFAULT_ENDPOINT,
            Credentials {
                user: "acct-1".into(),
                key: "secret".into(),
            },
        )
    }

    #[test]
    fn client_stores_endpoint() {
        let client = make_client();
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchClient>();
    }

    #[test]
    fn clone_preserves_credentials() {
        let client = make_client().clone();
        assert_eq!(client.credentials.user, "acct-1");
        assert_eq!(client.credentials.key, "secret");
    }
}
