//! HTTP transport for the Firebase Realtime Database REST API
//!
//! Each call is a single request against `{resource}.json`:
//! - `PATCH` with a JSON body merges a value into the document
//! - `DELETE` without a body removes it
//! - `GET` retrieves it
//!
//! Non-success statuses map to [`StorageError::NotFound`] (404),
//! [`StorageError::PermissionDenied`] (403) or [`StorageError::StoreError`].

use crate::error::{StorageError, StorageResult};
use crate::storage::storage_api::{utils, DocumentTransport, StorageConfig};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Document transport backed by a pooled `reqwest` client.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: StorageConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());
        builder = if config.keep_alive {
            builder.tcp_keepalive(Duration::from_secs(60))
        } else {
            builder.pool_max_idle_per_host(0)
        };

        let client = builder.build().map_err(|e| StorageError::Transport {
            reason: format!("Failed to create HTTP client: {}", e),
        })?;

        Ok(Self { client, config })
    }

    /// Transport configuration
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    async fn execute(&self, method: Method, url: &str, request: RequestBuilder) -> StorageResult<Bytes> {
        let path = utils::display_path(url);
        let response = request.send().await.map_err(|e| StorageError::Transport {
            reason: format!("{} {} failed: {}", method, path, e),
        })?;

        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "store request completed");

        if !status.is_success() {
            let body = Self::body_text(response).await;
            return Err(StorageError::from_status(status.as_u16(), path, body));
        }

        response.bytes().await.map_err(|e| StorageError::Transport {
            reason: format!("Failed to read response body: {}", e),
        })
    }

    async fn body_text(response: Response) -> String {
        response.text().await.unwrap_or_default()
    }

    fn decode(body: &[u8]) -> StorageResult<Value> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(body).map_err(|e| StorageError::Decode {
            reason: e.to_string(),
        })
    }
}

impl DocumentTransport for HttpTransport {
    async fn write(&self, resource_url: &str, value: &Value) -> StorageResult<Value> {
        let url = utils::ensure_json_suffix(resource_url);

        let (method, request) = if value.is_null() {
            (Method::DELETE, self.client.delete(&url))
        } else {
            let body = serde_json::to_vec(&utils::wrap_value(value))?;
            (Method::PATCH, self.client.patch(&url).body(body))
        };

        let body = self.execute(method, &url, request).await?;
        Self::decode(&body)
    }

    async fn read(&self, resource_url: &str) -> StorageResult<Value> {
        let url = utils::ensure_json_suffix(resource_url);
        let body = self.execute(Method::GET, &url, self.client.get(&url)).await?;
        Ok(utils::unwrap_value(Self::decode(&body)?))
    }
}
