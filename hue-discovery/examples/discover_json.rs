//! Simple bridge discovery that outputs JSON for scripting
//!
//! Usage: cargo run -p hue-sdk-discovery --example discover_json

use hue_discovery::discover_with_timeout;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct BridgeRecord {
    id: String,
    internal_address: String,
    mac_address: String,
    source: String,
}

#[tokio::main]
async fn main() {
    let timeout = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);

    match discover_with_timeout(Duration::from_secs(timeout)).await {
        Ok(bridge) => {
            let record = BridgeRecord {
                id: bridge.id,
                internal_address: bridge.internal_address,
                mac_address: bridge.mac_address,
                source: format!("{:?}", bridge.source),
            };
            println!("{}", serde_json::to_string_pretty(&record).unwrap());
        }
        Err(e) => {
            eprintln!("Discovery failed: {}", e);
            std::process::exit(1);
        }
    }
}
