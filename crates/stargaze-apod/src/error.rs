use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned by the raw APOD HTTP client.
#[derive(Debug, Error)]
pub enum ApodError {
    /// Network or TLS failure from the underlying HTTP client, or a non-2xx
    /// HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be parsed as JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A configured endpoint is not a valid URL.
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),
}

/// Errors surfaced by [`crate::Retriever`].
///
/// Per-day misses and bulk-tier failures are absorbed inside the tier
/// structure; only the cases below reach the caller.
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A newer retrieval started before this one finished; its results must
    /// not be displayed.
    #[error("retrieval superseded by a newer request")]
    Superseded,

    /// The fallback dataset could not be fetched or was not valid JSON.
    /// Terminal: every earlier tier already came up empty.
    #[error("fallback dataset unavailable: {0}")]
    FallbackUnavailable(#[source] ApodError),

    /// The fallback dataset parsed as JSON but was not an array of records.
    #[error("fallback dataset has unexpected shape: expected array, got {0}")]
    FallbackShape(String),
}
