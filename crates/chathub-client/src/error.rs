use thiserror::Error;

/// Failure taxonomy for a completion call.
///
/// Every failure path of [`crate::CompletionClient::complete`] maps onto one
/// of these variants; the call never panics and never smuggles error text
/// through the success channel.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The API credential is missing. Returned before any network I/O.
    #[error("OpenRouter API key not configured (set OPENROUTER_API_KEY)")]
    Config,

    /// Connection failure, timeout, or non-2xx HTTP status.
    #[error("transport error: {detail}")]
    Transport { detail: String },

    /// The HTTP call succeeded but the response body lacked the expected
    /// shape.
    #[error("unexpected response shape: {detail}")]
    Protocol { detail: String },

    /// Any other failure during the call.
    #[error("unexpected error: {detail}")]
    Unknown { detail: String },
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_status() || err.is_request() {
            CompletionError::Transport {
                detail: err.to_string(),
            }
        } else {
            CompletionError::Unknown {
                detail: err.to_string(),
            }
        }
    }
}
