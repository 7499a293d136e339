//! Fetch error taxonomy

use thiserror::Error;

/// Everything that can go wrong while fetching one movie list.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport call failed: DNS, refused connection, timeout, or the
    /// body could not be read.
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The body was not JSON or had no `results` array.
    #[error("failed to decode response body: {0}")]
    ResponseParse(#[source] serde_json::Error),

    /// TMDB answered with a non-2xx status.
    #[error("upstream error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    /// The endpoint path could not be joined onto the base URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FetchError {
    /// Stable short name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::ResponseParse(_) => "response_parse",
            FetchError::Upstream { .. } => "upstream",
            FetchError::InvalidUrl(_) => "invalid_url",
        }
    }
}
