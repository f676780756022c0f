//! # gleaner
//!
//! Batch search-result enrichment. Given a list of search terms, gleaner
//! queries a Yandex.XML-style search API through a bounded pool of
//! dispatch workers, fetches every result URL to harvest its `<meta>`
//! tags, and appends the enriched records to one JSONL file per term.
//!
//! ## Design
//!
//! - Round-robin dispatch: term `i` runs on worker `i mod W`; workers run
//!   in parallel while each walks its own terms strictly in order
//! - Unbounded enrichment fan-out: one task per result URL, reflecting
//!   that page fetches tolerate far more concurrency than the
//!   rate-limited search API
//! - A single aggregator owns all file writes, fed by an unbounded
//!   multi-producer channel; the run is over when the channel closes
//! - Failures are contained where they happen: a bad term or a dead URL
//!   is logged and skipped, and only invalid configuration aborts a run

pub mod config;
pub mod error;
pub mod http;
pub mod metadata;
pub mod pipeline;
pub mod response;
pub mod search;
pub mod sink;
pub mod types;

pub use config::{Credentials, PipelineConfig};
pub use error::{GleanError, Result};
pub use pipeline::PipelineSummary;
pub use types::{EnrichedRecord, Hit};

/// Run the full enrichment batch described by `config`.
///
/// Validates the configuration, then dispatches every term, enriches
/// every hit, and drains the record queue to disk. Returns once all
/// dispatch workers and enrichment tasks have finished and the queue is
/// empty.
///
/// # Errors
///
/// Returns [`GleanError::Config`] if the configuration is invalid and
/// [`GleanError::Http`] if the HTTP client cannot be built. Per-term and
/// per-hit failures never fail the run; they are logged and counted in
/// the returned [`PipelineSummary`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> gleaner::Result<()> {
/// let config = gleaner::PipelineConfig::new(
///     gleaner::Credentials {
///         user: "acct-1".into(),
///         key: "secret".into(),
///     },
///     vec!["rust async".into(), "tokio channels".into()],
///     "results",
/// );
/// let summary = gleaner::run(&config).await?;
/// println!("{} records written", summary.records_written);
/// # Ok(())
/// # }
/// ```
pub async fn run(config: &PipelineConfig) -> Result<PipelineSummary> {
    config.validate()?;
    pipeline::run(config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config() -> PipelineConfig {
        PipelineConfig::new(
            Credentials {
                user: "acct-1".into(),
                key: "secret".into(),
            },
            vec!["alpha".into()],
            "results",
        )
    }

    #[tokio::test]
    async fn run_rejects_zero_workers() {
        let mut config = make_config();
        config.workers = 0;
        let result = run(&config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("workers"));
    }

    #[tokio::test]
    async fn run_rejects_empty_terms() {
        let mut config = make_config();
        config.terms = vec![];
        let result = run(&config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("term"));
    }

    #[tokio::test]
    async fn run_rejects_missing_credentials() {
        let mut config = make_config();
        config.credentials.key = String::new();
        let result = run(&config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("key"));
    }
}
