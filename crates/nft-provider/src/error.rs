use thiserror::Error;

/// Errors from provider calls.
///
/// These describe the call as a whole failing. A single object that does not
/// exist is not an error; it comes back as `ObjectResponse::Missing`.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP request could not be completed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The node answered with a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The response did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The provider is not able to serve requests.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
