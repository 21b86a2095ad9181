//! Portal directory lookup for bridges.
//!
//! The vendor portal keeps a short-lived record of bridges that recently
//! phoned home from the caller's public address, which makes it a useful
//! fallback when multicast is filtered on the local network.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{DiscoveryError, Result};
use crate::ssdp;
use crate::{BridgeDescriptor, DiscoverySource};

/// Directory endpoint listing bridges seen on the caller's network
const PORTAL_URL: &str = "https://www.meethue.com/api/nupnp";

/// One entry in the portal directory response.
///
/// Older portal responses carried the bridge MAC; later ones dropped it, so
/// the field is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalEntry {
    pub id: String,
    #[serde(rename = "internalipaddress")]
    pub internal_ip_address: String,
    #[serde(rename = "macaddress")]
    pub mac_address: Option<String>,
}

/// Client for the vendor portal directory
#[derive(Debug, Clone)]
pub struct PortalClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl PortalClient {
    /// Create a client against the public portal endpoint
    pub fn new(timeout: Duration) -> Self {
        Self::with_endpoint(PORTAL_URL, timeout)
    }

    /// Create a client against a custom directory endpoint
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Look up the first bridge the portal lists for this network
    pub async fn discover(&self) -> Result<BridgeDescriptor> {
        let response = self
            .client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DiscoveryError::NetworkError(format!("Portal request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::NetworkError(format!(
                "Portal request failed: HTTP {}",
                status.as_u16()
            )));
        }

        let entries: Vec<PortalEntry> = response.json().await.map_err(|e| {
            DiscoveryError::MalformedResponse(format!("Portal response: {}", e))
        })?;

        tracing::debug!("Portal listed {} bridge(s)", entries.len());

        let entry = entries
            .into_iter()
            .next()
            .ok_or(DiscoveryError::NoBridgesFound)?;

        Ok(descriptor_from_entry(entry))
    }
}

fn descriptor_from_entry(entry: PortalEntry) -> BridgeDescriptor {
    let mac_address = entry
        .mac_address
        .unwrap_or_else(|| mac_from_bridge_id(&entry.id));

    BridgeDescriptor {
        id: entry.id,
        internal_address: entry.internal_ip_address,
        mac_address,
        source: DiscoverySource::Portal,
    }
}

/// Recover the MAC from an EUI-64 shaped bridge id by dropping the `fffe`
/// filler, e.g. `051785fffe09585a` -> `05:17:85:09:58:5a`.
///
/// Returns an empty string when the id has a different shape.
fn mac_from_bridge_id(id: &str) -> String {
    if id.len() == 16 && id.is_ascii() && id[6..10].eq_ignore_ascii_case("fffe") {
        let serial = format!("{}{}", &id[..6], &id[10..]);
        ssdp::mac_from_serial(&serial)
    } else {
        String::new()
    }
}
