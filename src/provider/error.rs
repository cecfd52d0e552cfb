use reqwest::StatusCode;
use thiserror::Error;

/// Failure while asking a provider for a story.
///
/// Callers that face the user collapse every variant into one message; the
/// detail here is for logs.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to connect to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("stream error: {0}")]
    Stream(#[source] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("provider reported an error: {0}")]
    Upstream(String),
}
