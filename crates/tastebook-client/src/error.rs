//! Client error types.

/// Errors that can occur when using the tastebook client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The restaurant or review does not exist.
    #[error("not found: {message}")]
    NotFound {
        /// Error message from the server.
        message: String,
    },

    /// The request was rejected as invalid, locally or by the server.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },

    /// Server returned any other error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// A successful response did not carry the expected payload.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<tastebook_core::ValidationError> for ClientError {
    fn from(err: tastebook_core::ValidationError) -> Self {
        Self::Validation {
            message: err.to_string(),
        }
    }
}
