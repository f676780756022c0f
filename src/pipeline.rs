//! The concurrent enrichment pipeline.
//!
//! Three stages share one unbounded record queue:
//!
//! 1. A fixed pool of dispatch workers. Terms are assigned round-robin
//!    (term `i` to worker `i mod W`); each worker runs its terms strictly
//!    in order and contains every failure at the term boundary.
//! 2. Unbounded enrichment fan-out: one detached task per hit fetches the
//!    page, extracts its meta tags, and sends one record into the queue.
//! 3. A single aggregator drains the queue and owns all file writes.
//!
//! Every producer path holds a clone of the queue sender, so the receiver
//! sees the channel close exactly when all workers and all in-flight
//! enrichment tasks have finished; that closure is the pipeline's
//! completion signal.

use crate::config::PipelineConfig;
use crate::error::GleanError;
use crate::http;
use crate::metadata;
use crate::response;
use crate::search::SearchClient;
use crate::sink::RecordWriter;
use crate::types::{EnrichedRecord, Hit};
use tokio::sync::mpsc;

/// Counters reported after a batch completes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Terms whose search response parsed into a hit list.
    pub terms_ok: usize,
    /// Terms skipped because of a search, parse, or transport failure.
    pub terms_failed: usize,
    /// Records appended to output files.
    pub records_written: usize,
    /// Records lost to storage failures.
    pub records_failed: usize,
}

/// Run the dispatch/enrichment/aggregation pipeline for a validated
/// configuration.
///
/// Returns once all dispatch workers have exhausted their terms, every
/// enrichment task has finished, and the record queue is drained.
///
/// # Errors
///
/// Returns [`GleanError::Http`] if the shared HTTP client cannot be
/// built. Per-term and per-hit failures never surface here; they are
/// logged and counted in the returned [`PipelineSummary`].
pub async fn run(config: &PipelineConfig) -> Result<PipelineSummary, GleanError> {
    let client = http::build_client(config)?;
    let search = SearchClient::new(
        client.clone(),
        config.endpoint.clone(),
        config.credentials.clone(),
    );

    let (record_tx, mut record_rx) = mpsc::unbounded_channel::<EnrichedRecord>();

    let slots = partition_terms(&config.terms, config.workers);
    let mut workers = Vec::with_capacity(slots.len());
    for (slot, terms) in slots.into_iter().enumerate() {
        let search = search.clone();
        let client = client.clone();
        let tx = record_tx.clone();
        workers.push(tokio::spawn(run_worker(slot, terms, search, client, tx)));
    }
    drop(record_tx);

    // Single consumer: all file writes happen here, in arrival order.
    let mut writer = RecordWriter::new(&config.output_dir);
    let mut summary = PipelineSummary::default();
    while let Some(record) = record_rx.recv().await {
        match writer.append(&record).await {
            Ok(()) => summary.records_written += 1,
            Err(err) => {
                tracing::error!(term = %record.term, url = %record.url, error = %err, "failed to persist record");
                summary.records_failed += 1;
            }
        }
    }

    for outcome in futures::future::join_all(workers).await {
        match outcome {
            Ok((ok, failed)) => {
                summary.terms_ok += ok;
                summary.terms_failed += failed;
            }
            Err(err) => tracing::error!(error = %err, "dispatch worker panicked"),
        }
    }

    tracing::info!(
        terms_ok = summary.terms_ok,
        terms_failed = summary.terms_failed,
        records_written = summary.records_written,
        records_failed = summary.records_failed,
        "batch complete"
    );
    Ok(summary)
}

/// Assign terms to `workers` slots in round-robin order: term `i` goes to
/// slot `i % workers`. Assignment order is preserved within each slot.
fn partition_terms(terms: &[String], workers: usize) -> Vec<Vec<String>> {
    let mut slots = vec![Vec::new(); workers];
    for (index, term) in terms.iter().enumerate() {
        slots[index % workers].push(term.clone());
    }
    slots
}

/// One dispatch worker: processes its assigned terms strictly in order.
///
/// A failed term is logged and skipped; it never blocks the worker's
/// remaining terms and never reaches another worker. Returns the
/// (succeeded, failed) term counts for this slot.
async fn run_worker(
    slot: usize,
    terms: Vec<String>,
    search: SearchClient,
    client: reqwest::Client,
    record_tx: mpsc::UnboundedSender<EnrichedRecord>,
) -> (usize, usize) {
    let mut ok = 0;
    let mut failed = 0;

    for term in terms {
        match search_term(&search, &term).await {
            Ok(hits) => {
                tracing::debug!(slot, term = %term, hits = hits.len(), "search succeeded");
                ok += 1;
                // Fan out without awaiting: the worker moves on to its
                // next term while these fetches are in flight.
                for hit in hits {
                    tokio::spawn(enrich_hit(
                        client.clone(),
                        term.clone(),
                        hit,
                        record_tx.clone(),
                    ));
                }
            }
            Err(err) => {
                tracing::warn!(slot, term = %term, error = %err, "search failed; term skipped");
                failed += 1;
            }
        }
    }

    (ok, failed)
}

/// Search one term and parse the response into its hit list.
async fn search_term(search: &SearchClient, term: &str) -> Result<Vec<Hit>, GleanError> {
    let body = search.search(term).await?;
    response::parse_search_response(&body)
}

/// One enrichment task: fetch the hit's page and hand the enriched record
/// to the aggregator. A failed fetch drops this hit only.
async fn enrich_hit(
    client: reqwest::Client,
    term: String,
    hit: Hit,
    record_tx: mpsc::UnboundedSender<EnrichedRecord>,
) {
    match metadata::fetch_meta_tags(&client, &hit.url).await {
        Ok(meta_tags) => {
            let record = EnrichedRecord {
                term,
                url: hit.url,
                description: hit.description,
                meta_tags,
            };
            let _ = record_tx.send(record);
        }
        Err(err) => {
            tracing::warn!(term = %term, url = %hit.url, error = %err, "metadata fetch failed; hit dropped");
        }
    }
}
