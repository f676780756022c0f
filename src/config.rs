//! Pipeline configuration with validation.
//!
//! [`PipelineConfig`] carries everything one batch run needs: credentials,
//! the term list, the pool width, output location, and request behaviour.
//! Validation happens once, at the [`crate::run`] boundary, before any
//! task is spawned.

use crate::error::GleanError;
use crate::search::DEFAULT_ENDPOINT;
use std::path::PathBuf;

/// Account credentials for the search API.
///
/// Carried as an explicit value into every search request rather than
/// ambient state.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account identifier.
    pub user: String,
    /// API key.
    pub key: String,
}

/// Configuration for one batch enrichment run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Search API credentials.
    pub credentials: Credentials,
    /// Number of parallel search-dispatch workers. Term `i` is assigned to
    /// worker `i mod workers`.
    pub workers: usize,
    /// Search terms; one output file is written per term.
    pub terms: Vec<String>,
    /// Directory receiving the per-term output files. Created (with
    /// parents) on first write.
    pub output_dir: PathBuf,
    /// Base URL of the search API.
    pub endpoint: String,
    /// Per-request HTTP timeout in seconds, for search requests and page
    /// fetches alike.
    pub timeout_seconds: u64,
    /// Custom User-Agent for page fetches. If `None`, rotates through a
    /// built-in list of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl PipelineConfig {
    /// Build a configuration with default pool width, endpoint, and
    /// timeout. Override fields afterwards as needed.
    pub fn new(credentials: Credentials, terms: Vec<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            credentials,
            workers: 4,
            terms,
            output_dir: output_dir.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 10,
            user_agent: None,
        }
    }

    /// Validates this configuration, returning an error if any field is
    /// invalid.
    ///
    /// Checks:
    /// - `credentials.user` and `credentials.key` must be non-empty
    /// - `workers` must be greater than 0
    /// - `terms` must be non-empty, and no term may be empty
    /// - `output_dir` must be non-empty
    /// - `endpoint` must be a parseable URL
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), GleanError> {
        if self.credentials.user.trim().is_empty() {
            return Err(GleanError::Config("user must not be empty".into()));
        }
        if self.credentials.key.trim().is_empty() {
            return Err(GleanError::Config("key must not be empty".into()));
        }
        if self.workers == 0 {
            return Err(GleanError::Config("workers must be greater than 0".into()));
        }
        if self.terms.is_empty() {
            return Err(GleanError::Config("at least one search term is required".into()));
        }
        if self.terms.iter().any(|term| term.trim().is_empty()) {
            return Err(GleanError::Config("search terms must not be empty".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(GleanError::Config("output_dir must not be empty".into()));
        }
        if url::Url::parse(&self.endpoint).is_err() {
            return Err(GleanError::Config(format!(
                "endpoint is not a valid URL: {}",
                self.endpoint
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(GleanError::Config("timeout_seconds must be greater than 0".into()));
        }
        Ok(())
    }
}
