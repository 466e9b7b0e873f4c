use std::time::Duration;
use thiserror::Error;

/// Why a single station could not be fetched.
///
/// These never abort a batch: each one is attached to the station it belongs to.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("Query failed for {url}: {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode METAR response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Fetch task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
