//! Error types for the JSON client

use thiserror::Error;

/// Errors that can occur during bridge HTTP communication
#[derive(Debug, Error)]
pub enum JsonError {
    /// Network or HTTP communication error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Parse(String),

    /// Unexpected HTTP status returned by the server
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),
}
