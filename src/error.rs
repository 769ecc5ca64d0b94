use thiserror::Error;

/// Domain failures raised by the collector, the JSONL store and the renderer.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("{path}:{line}: malformed record: {source}")]
    MalformedLine {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}:{line}: {reason}")]
    RejectedLine {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("GitHub API returned HTTP {status} for {url}: {body}")]
    Api {
        status: u16,
        url: String,
        body: String,
    },
}
