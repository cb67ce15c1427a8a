use thiserror::Error;

/// Errors raised by the search provider adapter.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("missing API key: {0} is not set")]
    MissingApiKey(String),

    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("search provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode search response: {0}")]
    Decode(String),
}
