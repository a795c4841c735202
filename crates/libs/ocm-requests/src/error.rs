//! HTTP client error types.

/// HTTP client errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be sent or the response body could not be read.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    /// A default header value contained invalid characters.
    #[error(transparent)]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// JSON serialization/deserialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
