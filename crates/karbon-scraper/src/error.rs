use thiserror::Error;

/// Failure to construct the scraper's collaborators.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A page could not be loaded or queried. Recoverable: the owning task skips
/// the page and moves on to the next index.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("navigation to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("selector query \"{selector}\" failed: {reason}")]
    Query { selector: String, reason: String },
}

impl PageError {
    /// `true` for failures raised by the selector engine rather than the fetch.
    #[must_use]
    pub fn is_query_failure(&self) -> bool {
        matches!(self, PageError::Query { .. })
    }
}

/// A single listing fragment could not be turned into a record. Recoverable:
/// only that listing is skipped.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("listing has no {field}")]
    MissingField { field: &'static str },

    #[error("listing query failed: {0}")]
    Query(#[from] PageError),

    #[error("unparseable price \"{raw}\": {reason}")]
    PriceParse { raw: String, reason: String },
}
