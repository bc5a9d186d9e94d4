use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum EeError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The requested resource does not exist.
    #[error("Not found: {url}")]
    NotFound {
        /// The URL that returned the error.
        url: String,
    },

    /// The server rejected the request because of rate limiting, and the bounded
    /// retry schedule was exhausted.
    #[error("Rate limited: {url}")]
    RateLimited {
        /// The URL that returned the error.
        url: String,
    },

    /// The server returned a 5xx status code.
    #[error("Server error {status} at {url}")]
    ServerError {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The server reported a structured error in the response body.
    #[error("Server error: {0}")]
    Server(String),

    /// The response claimed to be JSON but could not be parsed as such.
    #[error("Invalid JSON in response: {body}")]
    InvalidJson {
        /// The response body as text.
        body: String,
    },

    /// The response parsed as JSON but did not carry a `data` payload.
    #[error("Malformed response: {body}")]
    Malformed {
        /// The response body as text.
        body: String,
    },

    /// A JSON payload was expected but the response had a different content type.
    #[error("Response was unexpectedly not JSON, but {content_type}")]
    NotJson {
        /// The content type the server declared.
        content_type: String,
    },
}
