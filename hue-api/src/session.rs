//! Bridge sessions with lazy connection verification.
//!
//! A session pairs a bridge address with an application key and defers the
//! reachability check until the first operation needs it. The check runs at
//! most once per session; concurrent callers share the in-flight attempt
//! instead of issuing duplicate requests.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::{oneshot, Mutex};

use crate::error::{ApiError, Result};
use crate::paths;
use crate::transport::{BridgeTransport, HttpTransport};

/// Bridge configuration reported by a verified session.
///
/// Parsed from the `config` object of the bridge's state document. Bridges
/// across firmware generations disagree on which fields they report, so
/// everything is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeInfo {
    /// Friendly name of the bridge
    pub name: Option<String>,
    /// Bridge identifier, e.g. "051785FFFE09585A"
    #[serde(rename = "bridgeid")]
    pub bridge_id: Option<String>,
    /// MAC address of the bridge
    #[serde(rename = "mac")]
    pub mac_address: Option<String>,
    /// Firmware version
    #[serde(rename = "swversion")]
    pub sw_version: Option<String>,
    /// JSON API version the bridge speaks
    #[serde(rename = "apiversion")]
    pub api_version: Option<String>,
    /// Hardware model identifier
    #[serde(rename = "modelid")]
    pub model_id: Option<String>,
}

/// Connection gate of a session.
///
/// `Verifying` holds the callers waiting on the in-flight attempt; a failed
/// attempt falls back to `Unverified` so the next operation retries.
enum ConnectionState {
    Unverified,
    Verifying(Vec<oneshot::Sender<Result<Arc<BridgeInfo>>>>),
    Verified(Arc<BridgeInfo>),
}

/// A session against one bridge.
///
/// Created by [`Session::load`], which validates the configuration without
/// touching the network. The first operation that needs connectivity
/// triggers a single verification request; its result is memoized for the
/// session's lifetime. Clones share the same gate.
#[derive(Clone)]
pub struct Session {
    host: String,
    credential: String,
    transport: Arc<dyn BridgeTransport>,
    state: Arc<Mutex<ConnectionState>>,
}

impl Session {
    /// Create a session for a bridge address and application key.
    ///
    /// Fails fast with a configuration error when either value is empty.
    /// No network traffic happens here; verification is deferred to the
    /// first operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hue_api::Session;
    ///
    /// # async fn run() -> hue_api::Result<()> {
    /// let session = Session::load("192.168.1.42", "app-key")?;
    /// let bridge = session.connect().await?;
    /// println!("Connected to {}", bridge.name.as_deref().unwrap_or("bridge"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(host: impl Into<String>, credential: impl Into<String>) -> Result<Self> {
        Self::load_with_transport(host, credential, Arc::new(HttpTransport::new()))
    }

    /// Create a session with a custom transport (for advanced use cases)
    ///
    /// Most applications should use `Session::load` instead. This method is
    /// provided for cases where custom transport configuration is needed.
    pub fn load_with_transport(
        host: impl Into<String>,
        credential: impl Into<String>,
        transport: Arc<dyn BridgeTransport>,
    ) -> Result<Self> {
        let host = host.into();
        let credential = credential.into();

        if host.is_empty() || credential.is_empty() {
            return Err(ApiError::ConfigurationError(
                "Bridge address and application key are both required".to_string(),
            ));
        }

        Ok(Self {
            host,
            credential,
            transport,
            state: Arc::new(Mutex::new(ConnectionState::Unverified)),
        })
    }

    /// Bridge address this session talks to
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The memoized bridge info, if this session has already verified
    pub async fn bridge_info(&self) -> Option<Arc<BridgeInfo>> {
        match &*self.state.lock().await {
            ConnectionState::Verified(info) => Some(Arc::clone(info)),
            _ => None,
        }
    }

    /// Ensure the bridge is reachable and return its configuration.
    ///
    /// The first call issues one verification request against the session's
    /// application key; later calls return the memoized result. Callers
    /// arriving while verification is in flight wait for that attempt
    /// instead of issuing their own. A failed attempt is not memoized: it
    /// surfaces to every waiting caller and the next call starts fresh.
    pub async fn connect(&self) -> Result<Arc<BridgeInfo>> {
        let receiver = {
            let mut state = self.state.lock().await;
            match &mut *state {
                ConnectionState::Verified(info) => return Ok(Arc::clone(info)),
                ConnectionState::Verifying(waiters) => {
                    let (sender, receiver) = oneshot::channel();
                    waiters.push(sender);
                    receiver
                }
                ConnectionState::Unverified => {
                    let (sender, receiver) = oneshot::channel();
                    *state = ConnectionState::Verifying(vec![sender]);
                    self.spawn_verification();
                    receiver
                }
            }
        };

        receiver
            .await
            .map_err(|_| ApiError::NetworkError("Verification attempt was abandoned".to_string()))?
    }

    /// Run an operation once the bridge connection is verified.
    ///
    /// The operation receives the session's bridge info. Verification runs
    /// at most once per session; see [`Session::connect`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hue_api::Session;
    ///
    /// # async fn run() -> hue_api::Result<()> {
    /// let session = Session::load("192.168.1.42", "app-key")?;
    /// let api_version = session
    ///     .with_connection(|bridge| async move { Ok(bridge.api_version.clone()) })
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_connection<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(Arc<BridgeInfo>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let info = self.connect().await?;
        operation(info).await
    }

    /// Run the verification request on its own task.
    ///
    /// A separate task keeps the attempt alive even when the caller that
    /// started it is cancelled; the waiters registered in `Verifying` still
    /// get an answer.
    fn spawn_verification(&self) {
        let host = self.host.clone();
        let credential = self.credential.clone();
        let transport = Arc::clone(&self.transport);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            let outcome = verify(transport.as_ref(), &host, &credential).await;

            if let Err(e) = &outcome {
                tracing::debug!("Bridge verification failed: {}", e);
            }

            let waiters = {
                let mut state = state.lock().await;
                let waiters = match &mut *state {
                    ConnectionState::Verifying(waiters) => std::mem::take(waiters),
                    _ => Vec::new(),
                };
                *state = match &outcome {
                    Ok(info) => ConnectionState::Verified(Arc::clone(info)),
                    Err(_) => ConnectionState::Unverified,
                };
                waiters
            };

            for waiter in waiters {
                let _ = waiter.send(outcome.clone());
            }
        });
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

async fn verify(
    transport: &dyn BridgeTransport,
    host: &str,
    credential: &str,
) -> Result<Arc<BridgeInfo>> {
    tracing::debug!("Verifying bridge connection to {}", host);

    let document = transport.get_json(host, &paths::api(credential)).await?;
    let info = bridge_info_from_document(&document)?;

    tracing::info!(
        "Connected to bridge '{}' at {}",
        info.name.as_deref().unwrap_or("unnamed"),
        host
    );

    Ok(Arc::new(info))
}

/// Parse bridge info out of a verification reply.
///
/// A GET on the application key root returns the full state document with
/// the bridge description under `config`; a document without that object is
/// treated as the description itself. Replies that do not describe a bridge
/// (such as the error array sent for an unauthorized key) fail here.
fn bridge_info_from_document(document: &Value) -> Result<BridgeInfo> {
    let config = document.get("config").unwrap_or(document);

    serde_json::from_value(config.clone())
        .map_err(|e| ApiError::ParseError(format!("Response does not describe a bridge: {}", e)))
}
