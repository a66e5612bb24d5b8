//! Database interface selected by the client manager

use crate::error::StorageResult;
use crate::storage::storage_api::StorageBackend;
use async_trait::async_trait;
use serde_json::Value;

/// Keyed storage interface the manager persists its state through.
///
/// Keys are dot-separated logical keys; values are arbitrary JSON.
/// `get` returns `None` for a key holding nothing.
#[async_trait]
pub trait Database: Send + Sync {
    /// Store `value` under `key`
    async fn set(&self, key: &str, value: Value) -> StorageResult<()>;

    /// Retrieve the value under `key`
    async fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Append `value` to the array under `key`, creating it when absent
    async fn push(&self, key: &str, value: Value) -> StorageResult<()>;

    /// Remove the value under `key`, reporting whether the removal succeeded
    async fn delete(&self, key: &str) -> StorageResult<bool>;

    /// Which backend this is
    fn backend_type(&self) -> StorageBackend;
}
