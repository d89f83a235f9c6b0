use thiserror::Error;

/// Errors that can occur while requesting a completion.
#[derive(Error, Debug)]
pub enum AiError {
    /// Transport-level failure (connect, TLS, timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The endpoint rate limited the request (HTTP 429).
    /// Callers should back off before retrying.
    #[error("Rate limited by completion endpoint")]
    RateLimited,

    /// The endpoint answered with a non-success status.
    #[error("Completion endpoint returned HTTP {status}: {message}")]
    Endpoint {
        /// HTTP status code of the response
        status: u16,
        /// Response body, when one could be read
        message: String,
    },

    /// The response body did not carry a usable completion.
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}
