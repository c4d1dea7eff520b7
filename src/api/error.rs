//! Error type for the remote commerce API seams.

use thiserror::Error;

/// Errors that can occur while talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport or deserialization failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status; the message comes from its
    /// error body when one was readable.
    #[error("{message}")]
    Api { message: String },

    /// A 2xx body that does not match the expected envelope shape.
    #[error("unexpected response: {0}")]
    Malformed(String),
}
