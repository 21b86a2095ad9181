//! Private JSON client for bridge HTTP communication
//!
//! This crate provides a minimal JSON client specifically designed for
//! communicating with Hue bridges over their local HTTP API. The bridge
//! speaks plain JSON over three verbs (GET, PUT, POST); every call returns
//! the parsed response body as a `serde_json::Value`.

mod error;

pub use error::JsonError;

use std::time::Duration;

use serde_json::Value;

/// A minimal JSON client for bridge HTTP communication
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl JsonClient {
    /// Create a new JSON client with default configuration
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Create a JSON client with a custom per-request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Fetch the JSON document at a bridge path
    pub async fn get(&self, host: &str, path: &str) -> Result<Value, JsonError> {
        let url = self.url(host, path);
        tracing::debug!("GET {}", url);
        self.execute(self.client.get(&url)).await
    }

    /// Send a JSON body to a bridge path with PUT and return the response
    pub async fn put(&self, host: &str, path: &str, body: &Value) -> Result<Value, JsonError> {
        let url = self.url(host, path);
        tracing::debug!("PUT {}", url);
        self.execute(self.client.put(&url).json(body)).await
    }

    /// Send a JSON body to a bridge path with POST and return the response
    pub async fn post(&self, host: &str, path: &str, body: &Value) -> Result<Value, JsonError> {
        let url = self.url(host, path);
        tracing::debug!("POST {}", url);
        self.execute(self.client.post(&url).json(body)).await
    }

    fn url(&self, host: &str, path: &str) -> String {
        // Bridges answer on plain HTTP port 80; `host` may carry an explicit
        // port when talking to a non-standard listener.
        format!("http://{}{}", host, path)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Value, JsonError> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| JsonError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(JsonError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| JsonError::Parse(e.to_string()))
    }
}

impl Default for JsonClient {
    fn default() -> Self {
        Self::new()
    }
}
