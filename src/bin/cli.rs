//! CLI binary for gleaner.

use clap::Parser;
use gleaner::{Credentials, PipelineConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Gleaner: batch search-result enrichment.
///
/// Runs every term against the search API and writes one JSONL file of
/// enriched results per term.
#[derive(Parser)]
#[command(name = "gleaner", version, about)]
struct Cli {
    /// Search API account identifier.
    #[arg(long)]
    user: String,

    /// Search API key.
    #[arg(long)]
    key: String,

    /// Number of parallel search-dispatch workers.
    #[arg(short, long, default_value_t = 4)]
    workers: usize,

    /// Directory receiving one JSONL file per term.
    #[arg(short, long, default_value = "results")]
    output_dir: PathBuf,

    /// Search API endpoint.
    #[arg(long, default_value = gleaner::search::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Per-request HTTP timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Custom User-Agent for page fetches.
    #[arg(long)]
    user_agent: Option<String>,

    /// Search terms; one output file is written per term.
    #[arg(required = true)]
    terms: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to our own info logs; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gleaner=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = PipelineConfig::new(
        Credentials {
            user: cli.user,
            key: cli.key,
        },
        cli.terms,
        cli.output_dir,
    );
    config.workers = cli.workers;
    config.endpoint = cli.endpoint;
    config.timeout_seconds = cli.timeout;
    config.user_agent = cli.user_agent;

    let summary = gleaner::run(&config).await?;

    println!(
        "{} terms searched ({} failed), {} records written ({} failed) under {}",
        summary.terms_ok,
        summary.terms_failed,
        summary.records_written,
        summary.records_failed,
        config.output_dir.display(),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_invocation() {
        let cli = Cli::parse_from(["gleaner", "--user", "acct-1", "--key", "secret", "alpha"]);
        assert_eq!(cli.user, "acct-1");
        assert_eq!(cli.key, "secret");
        assert_eq!(cli.terms, vec!["alpha".to_string()]);
        assert_eq!(cli.workers, 4);
        assert_eq!(cli.output_dir, PathBuf::from("results"));
        assert_eq!(cli.endpoint, gleaner::search::DEFAULT_ENDPOINT);
    }

    #[test]
    fn parses_multiple_terms_and_overrides() {
        let cli = Cli::parse_from([
            "gleaner",
            "--user",
            "acct-1",
            "--key",
            "secret",
            "--workers",
            "2",
            "--output-dir",
            "out",
            "--timeout",
            "5",
            "alpha",
            "beta",
        ]);
        assert_eq!(cli.workers, 2);
        assert_eq!(cli.timeout, 5);
        assert_eq!(cli.terms, vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn rejects_missing_terms() {
        let result = Cli::try_parse_from(["gleaner", "--user", "acct-1", "--key", "secret"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_missing_credentials() {
        let result = Cli::try_parse_from(["gleaner", "alpha"]);
        assert!(result.is_err());
    }
}
