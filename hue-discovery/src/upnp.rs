//! Multicast probing for bridges on the local network
//!
//! This module owns the UDP socket work behind UPnP discovery: joining the
//! SSDP multicast group on every local interface, sending the search probe,
//! and listening for the first response that identifies itself as a bridge.

use std::net::{IpAddr, Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time;

use crate::error::{DiscoveryError, Result};
use crate::ssdp;
use crate::{BridgeDescriptor, DiscoverySource};

/// Discover a bridge by probing the SSDP multicast group.
///
/// The first datagram carrying the bridge marker wins; the socket lives for
/// this call only and closes on return.
pub(crate) async fn discover(timeout: Duration) -> Result<BridgeDescriptor> {
    let socket = bind_socket().await?;
    send_probe(&socket).await?;
    listen_with_deadline(&socket, timeout).await
}

async fn bind_socket() -> Result<UdpSocket> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
        .await
        .map_err(|e| DiscoveryError::NetworkError(format!("Failed to bind UDP socket: {}", e)))?;

    socket
        .set_broadcast(true)
        .map_err(|e| DiscoveryError::NetworkError(format!("Failed to set broadcast: {}", e)))?;

    socket
        .set_multicast_ttl_v4(128)
        .map_err(|e| DiscoveryError::NetworkError(format!("Failed to set multicast TTL: {}", e)))?;

    let addresses = local_ipv4_addresses();
    tracing::debug!("Joining multicast group on {} interface(s)", addresses.len());

    if addresses.is_empty() {
        // No enumerable interfaces; fall back to the default one
        if let Err(e) = socket.join_multicast_v4(ssdp::SSDP_MULTICAST_ADDR, Ipv4Addr::UNSPECIFIED) {
            tracing::debug!("Multicast join on the default interface failed: {}", e);
        }
    }

    for address in addresses {
        if let Err(e) = socket.join_multicast_v4(ssdp::SSDP_MULTICAST_ADDR, address) {
            tracing::debug!("Skipping multicast join on {}: {}", address, e);
        }
    }

    Ok(socket)
}

/// Non-loopback IPv4 addresses of the local interfaces.
///
/// Enumeration failures degrade to an empty list so probing can still go
/// out on the default interface.
fn local_ipv4_addresses() -> Vec<Ipv4Addr> {
    match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces
            .into_iter()
            .filter(|interface| !interface.is_loopback())
            .filter_map(|interface| match interface.ip() {
                IpAddr::V4(address) => Some(address),
                IpAddr::V6(_) => None,
            })
            .collect(),
        Err(e) => {
            tracing::debug!("Interface enumeration failed: {}", e);
            Vec::new()
        }
    }
}

async fn send_probe(socket: &UdpSocket) -> Result<()> {
    let message = ssdp::search_message();
    let target = SocketAddrV4::new(ssdp::SSDP_MULTICAST_ADDR, ssdp::SSDP_PORT);

    socket
        .send_to(message.as_bytes(), target)
        .await
        .map_err(|e| DiscoveryError::NetworkError(format!("Failed to send search probe: {}", e)))?;

    tracing::debug!("Sent search probe to {}", target);
    Ok(())
}

async fn listen_with_deadline(socket: &UdpSocket, timeout: Duration) -> Result<BridgeDescriptor> {
    time::timeout(timeout, listen(socket))
        .await
        .map_err(|_| DiscoveryError::Timeout)?
}

/// Wait for the first datagram that identifies itself as a bridge.
///
/// Datagrams without the bridge marker are skipped. A marked datagram that
/// cannot be parsed is fatal rather than skipped.
async fn listen(socket: &UdpSocket) -> Result<BridgeDescriptor> {
    let mut buffer = [0u8; 2048];

    loop {
        let (size, peer) = socket
            .recv_from(&mut buffer)
            .await
            .map_err(|e| DiscoveryError::NetworkError(format!("Socket error: {}", e)))?;

        let datagram = String::from_utf8_lossy(&buffer[..size]);
        if !ssdp::is_bridge_response(&datagram) {
            continue;
        }

        tracing::debug!("Bridge response from {}", peer.ip());
        let descriptor = descriptor_from_response(&datagram, peer.ip())?;
        tracing::info!(
            "Discovered bridge {} at {}",
            descriptor.id,
            descriptor.internal_address
        );
        return Ok(descriptor);
    }
}

fn descriptor_from_response(response: &str, address: IpAddr) -> Result<BridgeDescriptor> {
    let headers = ssdp::parse_headers(response);

    let usn = headers
        .get("USN")
        .ok_or_else(|| DiscoveryError::MalformedResponse("Missing USN header".to_string()))?;

    let serial = ssdp::serial_from_usn(usn).ok_or_else(|| {
        DiscoveryError::MalformedResponse(format!("No device serial in USN: {}", usn))
    })?;

    Ok(BridgeDescriptor {
        id: ssdp::bridge_id_from_serial(serial),
        internal_address: address.to_string(),
        mac_address: ssdp::mac_from_serial(serial),
        source: DiscoverySource::Upnp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRIDGE_RESPONSE: &str = "HTTP/1.1 200 OK\r\n\
        CACHE-CONTROL: max-age=100\r\n\
        EXT:\r\n\
        LOCATION: http://192.168.1.42:80/description.xml\r\n\
        SERVER: FreeRTOS/6.0.5, UPnP/1.0, IpBridge/0.1\r\n\
        ST: upnp:rootdevice\r\n\
        USN: uuid:2e502f50-db51-11e1-9e45-05178509585a::upnp:rootdevice\r\n\
        \r\n";

    #[test]
    fn test_descriptor_from_response() {
        let address: IpAddr = "192.168.1.42".parse().unwrap();
        let descriptor = descriptor_from_response(BRIDGE_RESPONSE, address).unwrap();

        assert_eq!(descriptor.id, "051785fffe09585a");
        assert_eq!(descriptor.internal_address, "192.168.1.42");
        assert_eq!(descriptor.mac_address, "05:17:85:09:58:5a");
        assert_eq!(descriptor.source, DiscoverySource::Upnp);
    }

    #[test]
    fn test_descriptor_requires_usn() {
        let response = "HTTP/1.1 200 OK\r\n\
            SERVER: FreeRTOS/6.0.5, UPnP/1.0, IpBridge/0.1\r\n\
            \r\n";
        let address: IpAddr = "192.168.1.42".parse().unwrap();

        let result = descriptor_from_response(response, address);
        match result {
            Err(DiscoveryError::MalformedResponse(msg)) => {
                assert!(msg.contains("Missing USN"));
            }
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_descriptor_requires_parseable_usn() {
        let response = "HTTP/1.1 200 OK\r\n\
            SERVER: FreeRTOS/6.0.5, UPnP/1.0, IpBridge/0.1\r\n\
            USN: upnp:rootdevice\r\n\
            \r\n";
        let address: IpAddr = "192.168.1.42".parse().unwrap();

        let result = descriptor_from_response(response, address);
        match result {
            Err(DiscoveryError::MalformedResponse(msg)) => {
                assert!(msg.contains("USN"));
            }
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_listen_skips_non_bridge_datagrams() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = receiver.local_addr().unwrap();
        let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        let other_device = "HTTP/1.1 200 OK\r\n\
            SERVER: Linux/3.14.0 UPnP/1.0 Sonos/70.3-35220\r\n\
            USN: uuid:RINCON_000E58A0123456::urn:schemas-upnp-org:device:ZonePlayer:1\r\n\
            \r\n";
        sender.send_to(other_device.as_bytes(), target).await.unwrap();
        sender.send_to(BRIDGE_RESPONSE.as_bytes(), target).await.unwrap();

        let descriptor = listen(&receiver).await.unwrap();
        assert_eq!(descriptor.id, "051785fffe09585a");
        assert_eq!(descriptor.internal_address, "127.0.0.1");
    }

    #[tokio::test]
    async fn test_marked_but_unparseable_datagram_is_fatal() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = receiver.local_addr().unwrap();
        let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        let broken = "HTTP/1.1 200 OK\r\n\
            SERVER: FreeRTOS/6.0.5, UPnP/1.0, IpBridge/0.1\r\n\
            \r\n";
        sender.send_to(broken.as_bytes(), target).await.unwrap();

        let result = listen(&receiver).await;
        assert!(matches!(result, Err(DiscoveryError::MalformedResponse(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_listen_deadline_expires() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        let result = listen_with_deadline(&receiver, Duration::from_millis(50)).await;
        assert!(matches!(result, Err(DiscoveryError::Timeout)));
    }
}
