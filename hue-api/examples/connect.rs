//! Discover a bridge and verify a session against it
//!
//! Usage: cargo run -p hue-api --example connect -- <application-key>
//!
//! The application key is the username registered with the bridge after
//! pressing its link button; any previously registered key works.

use hue_api::Session;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hue_api=debug".parse().unwrap())
                .add_directive("hue_discovery=debug".parse().unwrap()),
        )
        .init();

    let key = match std::env::args().nth(1) {
        Some(key) => key,
        None => {
            eprintln!("Usage: connect <application-key>");
            std::process::exit(1);
        }
    };

    println!("Searching for a bridge...");
    let bridge = match hue_discovery::discover().await {
        Ok(bridge) => bridge,
        Err(e) => {
            eprintln!("Discovery failed: {}", e);
            std::process::exit(1);
        }
    };
    println!("Found bridge {} at {}", bridge.id, bridge.internal_address);

    let session = match Session::load(bridge.internal_address, key) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    match session.connect().await {
        Ok(info) => {
            println!(
                "Connected to '{}'",
                info.name.as_deref().unwrap_or("unnamed bridge")
            );
            println!("  model:       {}", info.model_id.as_deref().unwrap_or("?"));
            println!("  api version: {}", info.api_version.as_deref().unwrap_or("?"));
            println!("  firmware:    {}", info.sw_version.as_deref().unwrap_or("?"));
        }
        Err(e) => {
            eprintln!("Connection failed: {}", e);
            std::process::exit(1);
        }
    }
}
