//! Error types for the gleaner crate.
//!
//! All errors use stable string messages suitable for display to operators
//! and programmatic handling. API keys never appear in error messages.

/// Errors that can occur during a batch enrichment run.
#[derive(Debug, thiserror::Error)]
pub enum GleanError {
    /// Invalid pipeline configuration. Fatal; surfaced before any work starts.
    #[error("config error: {0}")]
    Config(String),

    /// The search API reported a domain-level error for a query.
    #[error("search API error: {0}")]
    Search(String),

    /// A response or page could not be parsed into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// An HTTP request failed: network error, timeout, or non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// An output file or directory could not be written.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Convenience type alias for gleaner results.
pub type Result<T> = std::result::Result<T, GleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = GleanError::Config("workers must be greater than 0".into());
        assert_eq!(err.to_string(), "config error: workers must be greater than 0");
    }

    #[test]
    fn display_search() {
        let err = GleanError::Search("invalid key".into());
        assert_eq!(err.to_string(), "search API error: invalid key");
    }

    #[test]
    fn display_parse() {
        let err = GleanError::Parse("missing response element".into());
        assert_eq!(err.to_string(), "parse error: missing response element");
    }

    #[test]
    fn display_http() {
        let err = GleanError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_storage() {
        let err = GleanError::Storage("permission denied".into());
        assert_eq!(err.to_string(), "storage error: permission denied");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GleanError>();
    }
}
