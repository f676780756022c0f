//! Record persistence: one append-only JSONL file per search term.
//!
//! The aggregator loop is the only writer, so per-file locking is
//! unnecessary; each append is a single write of one serialized record
//! plus its newline separator.

use crate::error::GleanError;
use crate::types::EnrichedRecord;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Wire shape of one output line. The term is carried by the file name,
/// not the record.
#[derive(Serialize)]
struct RecordLine<'a> {
    url: &'a str,
    description: &'a str,
    #[serde(rename = "metaTags")]
    meta_tags: &'a HashMap<String, String>,
}

/// Appends enriched records to per-term files under one output directory.
#[derive(Debug)]
pub struct RecordWriter {
    output_dir: PathBuf,
    dir_ready: bool,
}

impl RecordWriter {
    /// Create a writer rooted at `output_dir`. Nothing is touched on disk
    /// until the first append.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            dir_ready: false,
        }
    }

    /// Append one record to its term's file, creating the output
    /// directory (with parents) on first write.
    ///
    /// # Errors
    ///
    /// Returns [`GleanError::Storage`] when the directory or file cannot
    /// be created or written. The failure is scoped to this record;
    /// callers keep consuming.
    pub async fn append(&mut self, record: &EnrichedRecord) -> Result<(), GleanError> {
        if !self.dir_ready {
            tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
                GleanError::Storage(format!(
                    "failed to create {}: {e}",
                    self.output_dir.display()
                ))
            })?;
            self.dir_ready = true;
        }

        let line = RecordLine {
            url: &record.url,
            description: &record.description,
            meta_tags: &record.meta_tags,
        };
        let mut buf = serde_json::to_vec(&line)
            .map_err(|e| GleanError::Storage(format!("failed to serialize record: {e}")))?;
        buf.push(b'\n');

        let path = self.term_path(&record.term);
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| GleanError::Storage(format!("failed to open {}: {e}", path.display())))?;
        file.write_all(&buf)
            .await
            .map_err(|e| GleanError::Storage(format!("failed to append to {}: {e}", path.display())))?;

        Ok(())
    }

    /// File path owning records for `term`:
    /// `<output-dir>/<sanitized term>.jsonl`.
    pub fn term_path(&self, term: &str) -> PathBuf {
        self.output_dir.join(format!("{}.jsonl", sanitize_term(term)))
    }
}

/// Turn a term into a safe file stem: path separators and other
/// filesystem-hostile characters become underscores.
fn sanitize_term(term: &str) -> String {
    let cleaned: String = term
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let trimmed = cleaned.trim_matches(&['_', ' ', '.'][..]);
    if trimmed.is_empty() {
        "term".to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
