//! Core types flowing through the enrichment pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single result extracted from one search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    /// The result URL.
    pub url: String,
    /// The first text passage returned for the result; empty when the
    /// response carried none.
    pub description: String,
}

/// A hit annotated with the meta tags harvested from its page.
///
/// Produced by one enrichment task, consumed exactly once by the
/// aggregator, which appends it to the file owned by `term`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// The search term that produced this hit.
    pub term: String,
    /// The result URL.
    pub url: String,
    /// The search-engine snippet for the result.
    pub description: String,
    /// `<meta>` name/content pairs from the fetched page. Keys are unique;
    /// when a page repeats a name, the last occurrence wins.
    pub meta_tags: HashMap<String, String>,
}
