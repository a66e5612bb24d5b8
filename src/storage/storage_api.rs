//! Document transport API and shared path/value helpers
//!
//! This module defines the contract every document transport fulfils (HTTP
//! against the remote store, or the in-memory stand-in), the transport
//! configuration, and the pure helpers that turn client identifiers and
//! logical keys into store paths.

use crate::error::StorageResult;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

use super::constants::{DEFAULT_TIMEOUT_SECONDS, JSON_SUFFIX, STRING_WRAPPER_KEY};

/// Transport configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// Keep pooled connections alive between requests
    pub keep_alive: bool,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            keep_alive: true,
            user_agent: format!("{}/{}", crate::CRATE_NAME, crate::VERSION),
        }
    }
}

/// Storage backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageBackend {
    /// Process-local default backend
    Memory,
    /// Remote Firebase Realtime Database
    Firebase,
}

/// A stateless request/response channel to a JSON document store.
///
/// Both operations take the full resource URL; the `.json` suffix is added
/// when missing. Each call maps to exactly one request.
pub trait DocumentTransport: Send + Sync {
    /// Merge `value` into the document at `resource_url`, or remove it when
    /// `value` is null. Returns the store's decoded response.
    fn write(
        &self,
        resource_url: &str,
        value: &Value,
    ) -> impl Future<Output = StorageResult<Value>> + Send;

    /// Retrieve the document at `resource_url`, unwrapping stored strings.
    fn read(&self, resource_url: &str) -> impl Future<Output = StorageResult<Value>> + Send;
}

/// Utility functions for path and value handling
pub mod utils {
    use super::*;
    use crate::error::StorageError;
    use serde_json::Map;

    /// Turn a client identifier into a namespace root safe for use as a
    /// single path segment.
    ///
    /// Every character outside `[A-Za-z0-9_-]` becomes `_`, and a run of
    /// whitespace collapses to a single `_`. Characters outside the Basic
    /// Multilingual Plane count as two, so an emoji becomes `__`.
    pub fn sanitize_namespace(id: Option<&str>) -> String {
        let Some(id) = id else {
            return String::new();
        };

        let mut out = String::with_capacity(id.len());
        let mut in_whitespace = false;
        for ch in id.chars() {
            if ch.is_whitespace() {
                if !in_whitespace {
                    out.push('_');
                }
                in_whitespace = true;
                continue;
            }
            in_whitespace = false;
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                out.push(ch);
            } else {
                // one `_` per UTF-16 unit keeps roots written by JavaScript clients
                out.extend(std::iter::repeat('_').take(ch.len_utf16()));
            }
        }
        out
    }

    /// Validate a logical key and convert its `.` separators to `/`.
    ///
    /// Keys are trusted input and are not sanitized like the namespace, so a
    /// key may hold `/` or `$`. Characters that would let the request leave
    /// the namespace once the URL is parsed (`%` escapes, `\`, `?`, `#` and
    /// control characters) are rejected with [`StorageError::UnsafeKey`].
    pub fn key_to_path(key: &str) -> StorageResult<String> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey);
        }
        if key.chars().any(is_unsafe_key_char) {
            return Err(StorageError::UnsafeKey {
                key: key.to_string(),
            });
        }
        Ok(key.replace('.', "/"))
    }

    fn is_unsafe_key_char(ch: char) -> bool {
        matches!(ch, '%' | '\\' | '?' | '#') || ch.is_control()
    }

    /// Build `{namespace}/{key path}`.
    pub fn namespaced_path(namespace: &str, key: &str) -> StorageResult<String> {
        Ok(format!("{}/{}", namespace, key_to_path(key)?))
    }

    /// Build the full resource URL for a store path.
    pub fn resource_url(base_url: &str, path: &str) -> String {
        format!("{}/{}{}", base_url.trim_end_matches('/'), path, JSON_SUFFIX)
    }

    /// Append the `.json` suffix unless it is already present.
    pub fn ensure_json_suffix(url: &str) -> String {
        if url.ends_with(JSON_SUFFIX) {
            url.to_string()
        } else {
            format!("{}{}", url, JSON_SUFFIX)
        }
    }

    /// Wrap a bare string as `{"default": s}`; other values pass through.
    pub fn wrap_value(value: &Value) -> Value {
        match value {
            Value::String(s) => {
                let mut map = Map::with_capacity(1);
                map.insert(STRING_WRAPPER_KEY.to_string(), Value::String(s.clone()));
                Value::Object(map)
            }
            other => other.clone(),
        }
    }

    /// Undo [`wrap_value`]: an object whose only key is `default` yields that
    /// key's value.
    pub fn unwrap_value(value: Value) -> Value {
        match value {
            Value::Object(mut map) if map.len() == 1 && map.contains_key(STRING_WRAPPER_KEY) => map
                .remove(STRING_WRAPPER_KEY)
                .unwrap_or(Value::Null),
            other => other,
        }
    }

    /// Path part of a resource URL, used for logging and error messages.
    pub fn display_path(url: &str) -> &str {
        let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
        without_scheme
            .find('/')
            .map(|pos| &without_scheme[pos..])
            .unwrap_or("/")
    }
}
