use json_client::JsonError;
use thiserror::Error;

/// High-level API errors for bridge operations
///
/// This enum provides domain-specific error types that abstract away the
/// underlying HTTP communication details and cover the common failure
/// scenarios when talking to a bridge.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Missing or invalid session configuration
    ///
    /// This error is returned before any network traffic, when a session is
    /// loaded without a bridge address or application key.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Network communication error
    ///
    /// This error occurs when there are network-level issues communicating
    /// with the bridge, such as connection timeouts, DNS resolution
    /// failures, or the bridge being unreachable.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response parsing error
    ///
    /// This error occurs when the bridge returns a response that cannot be
    /// parsed into the expected format, including verification replies that
    /// do not describe a bridge.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unexpected HTTP status returned by the bridge
    #[error("Bridge returned HTTP status {0}")]
    StatusError(u16),
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Convert from JsonError to ApiError
impl From<JsonError> for ApiError {
    fn from(error: JsonError) -> Self {
        match error {
            JsonError::Network(msg) => ApiError::NetworkError(msg),
            JsonError::Parse(msg) => ApiError::ParseError(msg),
            JsonError::Status(code) => ApiError::StatusError(code),
        }
    }
}
