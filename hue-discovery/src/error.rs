//! Error types for the discovery system.

use thiserror::Error;

/// Error type for discovery operations.
///
/// Represents the failure modes that can occur while locating a bridge,
/// including network issues, unparseable responses, and timeouts.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Network-related errors (socket creation, HTTP requests, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A response matched the bridge filter but not the expected shape
    #[error("Malformed discovery response: {0}")]
    MalformedResponse(String),

    /// Operation timed out waiting for responses
    #[error("Operation timed out")]
    Timeout,

    /// The portal directory listed no bridges for this network
    #[error("No bridges found on the local network")]
    NoBridgesFound,

    /// The discovery race finished without producing a bridge
    #[error("All discovery strategies failed")]
    AllDiscoveryFailed(#[source] Box<DiscoveryError>),
}

/// Convenience Result type alias for discovery operations.
///
/// Equivalent to `std::result::Result<T, DiscoveryError>`.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
