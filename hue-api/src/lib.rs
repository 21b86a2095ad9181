//! High-level Hue API for bridge sessions
//!
//! This crate provides a session-based API for talking to a Hue bridge.
//! It uses the private `json-client` crate for low-level JSON-over-HTTP
//! communication.
//!
//! # Lazy Connection
//!
//! A [`Session`] is created offline and verified against the bridge on
//! first use:
//!
//! ```no_run
//! use hue_api::Session;
//!
//! # async fn run() -> hue_api::Result<()> {
//! let session = Session::load("192.168.1.42", "app-key")?;
//!
//! // The first operation triggers a single verification request.
//! let bridge = session.connect().await?;
//! println!("api version: {}", bridge.api_version.as_deref().unwrap_or("?"));
//! # Ok(())
//! # }
//! ```
//!
//! Verification runs at most once per session. Callers arriving while it is
//! in flight share the attempt, and clones of a session share its result.

pub mod error;
pub mod paths;
pub mod session;
pub mod transport;

pub use error::{ApiError, Result};
pub use session::{BridgeInfo, Session};
pub use transport::{BridgeTransport, HttpTransport};
