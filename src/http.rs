//! Shared HTTP client for search requests and result-page fetches.
//!
//! Provides a configured [`reqwest::Client`] with a request timeout and
//! rotating User-Agent strings. One client is built per run and cloned
//! into every worker and enrichment task.

use crate::config::PipelineConfig;
use crate::error::GleanError;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Realistic browser User-Agent strings, one picked per run.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Build a [`reqwest::Client`] for one batch run.
///
/// The client has:
/// - Timeout from config, applied to every request
/// - Random User-Agent from the built-in rotation list (or custom if
///   configured)
/// - Gzip and brotli decompression
///
/// # Errors
///
/// Returns [`GleanError::Http`] if the client cannot be constructed.
pub fn build_client(config: &PipelineConfig) -> Result<reqwest::Client, GleanError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| GleanError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}
