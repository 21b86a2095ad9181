//! Hue bridge discovery library
//!
//! This crate provides a simple API for locating a Philips Hue bridge on the
//! local network. Two strategies are supported: SSDP multicast probing and a
//! lookup against the vendor portal directory. The default entry point races
//! both and reports whichever answers first.
//!
//! # Quick Start
//!
//! ```no_run
//! use hue_discovery::discover;
//!
//! # async fn run() -> Result<(), hue_discovery::DiscoveryError> {
//! let bridge = discover().await?;
//! println!("Found bridge {} at {}", bridge.id, bridge.internal_address);
//! # Ok(())
//! # }
//! ```
//!
//! # Picking a Strategy
//!
//! Either strategy can also be run on its own:
//!
//! ```no_run
//! use hue_discovery::discover_via_portal;
//!
//! # async fn run() -> Result<(), hue_discovery::DiscoveryError> {
//! let bridge = discover_via_portal().await?;
//! println!("Portal says the bridge lives at {}", bridge.internal_address);
//! # Ok(())
//! # }
//! ```

mod error;
mod race;
mod ssdp;
mod upnp;
pub mod portal;

pub use error::{DiscoveryError, Result};

use std::time::Duration;

/// Default deadline for discovery operations.
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// How a bridge was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverySource {
    /// Answered a multicast probe on the local network
    Upnp,
    /// Listed by the vendor portal directory
    Portal,
}

/// Information about a discovered bridge.
///
/// Contains the identity and address needed to open a session against the
/// bridge. Both strategies produce the same shape.
#[derive(Debug, Clone)]
pub struct BridgeDescriptor {
    /// Bridge identifier derived from the device serial, e.g. "051785fffe09585a"
    pub id: String,
    /// IP address of the bridge on the local network
    pub internal_address: String,
    /// MAC address of the bridge, e.g. "05:17:85:09:58:5a"
    pub mac_address: String,
    /// Which strategy located the bridge
    pub source: DiscoverySource,
}

/// Discover a bridge with the default 5-second timeout.
///
/// Races multicast probing against the portal lookup and reports whichever
/// settles first, success or failure. For control over the deadline use
/// `discover_with_timeout`.
///
/// # Examples
///
/// ```no_run
/// use hue_discovery::discover;
///
/// # async fn run() -> Result<(), hue_discovery::DiscoveryError> {
/// let bridge = discover().await?;
/// println!("Found bridge {} at {}", bridge.id, bridge.internal_address);
/// # Ok(())
/// # }
/// ```
pub async fn discover() -> Result<BridgeDescriptor> {
    discover_with_timeout(DEFAULT_DISCOVERY_TIMEOUT).await
}

/// Discover a bridge with a custom timeout.
///
/// The timeout bounds the multicast listen; the portal lookup applies it to
/// its HTTP request. The race settles on the first outcome either strategy
/// produces.
///
/// # Arguments
///
/// * `timeout` - Maximum duration to wait for network operations
///
/// # Examples
///
/// ```no_run
/// use hue_discovery::discover_with_timeout;
/// use std::time::Duration;
///
/// # async fn run() -> Result<(), hue_discovery::DiscoveryError> {
/// let bridge = discover_with_timeout(Duration::from_secs(10)).await?;
/// println!("Found bridge at {}", bridge.internal_address);
/// # Ok(())
/// # }
/// ```
pub async fn discover_with_timeout(timeout: Duration) -> Result<BridgeDescriptor> {
    race::discover(timeout).await
}

/// Discover a bridge by multicast probing only, with the default timeout.
pub async fn discover_via_upnp() -> Result<BridgeDescriptor> {
    discover_via_upnp_with_timeout(DEFAULT_DISCOVERY_TIMEOUT).await
}

/// Discover a bridge by multicast probing only, with a custom timeout.
///
/// Sends one search probe to the SSDP multicast group and waits for the
/// first response carrying the bridge marker.
///
/// # Arguments
///
/// * `timeout` - Maximum duration to wait for a matching response
///
/// # Examples
///
/// ```no_run
/// use hue_discovery::{discover_via_upnp_with_timeout, DiscoveryError};
/// use std::time::Duration;
///
/// # async fn run() {
/// match discover_via_upnp_with_timeout(Duration::from_secs(3)).await {
///     Ok(bridge) => println!("Bridge answered from {}", bridge.internal_address),
///     Err(DiscoveryError::Timeout) => println!("No bridge answered in time"),
///     Err(e) => println!("Discovery failed: {}", e),
/// }
/// # }
/// ```
pub async fn discover_via_upnp_with_timeout(timeout: Duration) -> Result<BridgeDescriptor> {
    upnp::discover(timeout).await
}

/// Discover a bridge through the vendor portal, with the default timeout.
///
/// The portal lists bridges that recently phoned home from this network's
/// public address. Useful when multicast is filtered.
///
/// # Examples
///
/// ```no_run
/// use hue_discovery::discover_via_portal;
///
/// # async fn run() -> Result<(), hue_discovery::DiscoveryError> {
/// let bridge = discover_via_portal().await?;
/// println!("Bridge MAC: {}", bridge.mac_address);
/// # Ok(())
/// # }
/// ```
pub async fn discover_via_portal() -> Result<BridgeDescriptor> {
    discover_via_portal_with_timeout(DEFAULT_DISCOVERY_TIMEOUT).await
}

/// Discover a bridge through the vendor portal, with a custom timeout.
pub async fn discover_via_portal_with_timeout(timeout: Duration) -> Result<BridgeDescriptor> {
    portal::PortalClient::new(timeout).discover().await
}
