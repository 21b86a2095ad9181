//! SSDP (Simple Service Discovery Protocol) wire format for bridge discovery
//!
//! This module provides the probe message, response filtering, and header
//! parsing used to locate bridges on the local network. It is not part of
//! the public API.

use std::collections::HashMap;
use std::net::Ipv4Addr;

/// Multicast group SSDP probes are sent to
pub(crate) const SSDP_MULTICAST_ADDR: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);

/// Port the multicast group listens on
pub(crate) const SSDP_PORT: u16 = 1900;

/// Marker bridges embed in their discovery responses
const BRIDGE_MARKER: &str = "IpBridge";

/// Build the M-SEARCH probe sent to the multicast group.
///
/// Bridges answer this newline-joined form; the MX value gives devices up
/// to ten seconds to respond.
pub(crate) fn search_message() -> String {
    [
        "M-SEARCH * HTTP/1.1",
        "HOST: 239.255.255.250:1900",
        "MAN: ssdp:discover",
        "MX: 10",
        "ST: ssdp:all",
    ]
    .join("\n")
}

/// Check whether a datagram came from a bridge
pub(crate) fn is_bridge_response(response: &str) -> bool {
    response.contains(BRIDGE_MARKER)
}

/// Parse a discovery response into a header map.
///
/// Lines are split on the first `": "`; the status line and headers without
/// a value are skipped. Header names are matched case-insensitively by
/// storing them uppercased.
pub(crate) fn parse_headers(response: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for line in response.lines() {
        if let Some((name, value)) = line.split_once(": ") {
            headers.insert(name.to_ascii_uppercase(), value.to_string());
        }
    }

    headers
}

/// Extract the 12 hex digit device serial from a USN header value.
///
/// The serial is the token between `-` and `:`, e.g. the trailing group in
/// `uuid:2e502f50-db51-11e1-9e45-05178509585a::upnp:rootdevice`.
pub(crate) fn serial_from_usn(usn: &str) -> Option<&str> {
    let bytes = usn.as_bytes();

    for (i, byte) in bytes.iter().enumerate() {
        if *byte != b'-' {
            continue;
        }

        let start = i + 1;
        let end = start + 12;
        if end < bytes.len()
            && bytes[start..end].iter().all(|b| is_lower_hex(*b))
            && bytes[end] == b':'
        {
            return Some(&usn[start..end]);
        }
    }

    None
}

fn is_lower_hex(byte: u8) -> bool {
    byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte)
}

/// Derive the bridge id from a device serial by inserting the EUI-64
/// `fffe` filler, e.g. `05178509585a` -> `051785fffe09585a`.
pub(crate) fn bridge_id_from_serial(serial: &str) -> String {
    format!("{}fffe{}", &serial[..6], &serial[6..])
}

/// Format a device serial as a MAC address, e.g. `05178509585a` ->
/// `05:17:85:09:58:5a`.
pub(crate) fn mac_from_serial(serial: &str) -> String {
    let digits: Vec<char> = serial.chars().collect();
    digits
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(":")
}
