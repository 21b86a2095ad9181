//! Transport seam between the session layer and the bridge HTTP API.

use json_client::JsonClient;
use serde_json::Value;

use crate::error::Result;

/// JSON transport a session uses to reach a bridge.
///
/// The default implementation talks HTTP through the JSON client; tests
/// swap in scripted or counting transports.
#[async_trait::async_trait]
pub trait BridgeTransport: Send + Sync {
    /// Fetch the JSON document at a bridge path
    async fn get_json(&self, host: &str, path: &str) -> Result<Value>;

    /// Send a JSON body with PUT and return the response
    async fn put_json(&self, host: &str, path: &str, body: &Value) -> Result<Value>;

    /// Send a JSON body with POST and return the response
    async fn post_json(&self, host: &str, path: &str, body: &Value) -> Result<Value>;
}

/// HTTP transport backed by the JSON client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: JsonClient,
}

impl HttpTransport {
    /// Create a transport with the default client configuration
    pub fn new() -> Self {
        Self {
            client: JsonClient::new(),
        }
    }

    /// Create a transport around a preconfigured client
    pub fn with_client(client: JsonClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl BridgeTransport for HttpTransport {
    async fn get_json(&self, host: &str, path: &str) -> Result<Value> {
        Ok(self.client.get(host, path).await?)
    }

    async fn put_json(&self, host: &str, path: &str, body: &Value) -> Result<Value> {
        Ok(self.client.put(host, path, body).await?)
    }

    async fn post_json(&self, host: &str, path: &str, body: &Value) -> Result<Value> {
        Ok(self.client.post(host, path, body).await?)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}
