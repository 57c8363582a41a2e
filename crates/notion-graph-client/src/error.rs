//! Fetch failures

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Token or database id was empty.
    #[error("{0} must not be empty")]
    EmptyArgument(&'static str),

    /// Transport-level failure: DNS, TLS, connection reset, timeout.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status (401 for a bad token).
    #[error("Notion API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the expected `{"results": [...]}` shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A saved response could not be read from disk.
    #[error("cannot read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
