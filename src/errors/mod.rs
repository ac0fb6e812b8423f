use thiserror::Error;

/// Failures while driving the browser or reading its pages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeError {
    #[error("timed out waiting for '{marker}' on {url}")]
    PageLoadTimeout { url: String, marker: String },

    #[error("browser error: {0}")]
    Browser(String),

    #[error("invalid selector {0}")]
    Selector(String),

    #[error("browser session already closed")]
    SessionClosed,
}

impl ScrapeError {
    pub fn browser(context: &str, err: impl std::fmt::Display) -> Self {
        ScrapeError::Browser(format!("{}: {}", context, err))
    }
}

/// Failures of a compare or predict call.
///
/// The pipeline routes every variant the same way; the split only keeps logs readable.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{url} returned HTTP {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("could not reach {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("malformed response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("service rejected the request: {0}")]
    Rejected(String),
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}
