//! Namespaced keyed store on top of a document transport
//!
//! Every logical key is scoped under the manager's sanitized client
//! identifier: `settings.volume` for client `user.1#a` lives at
//! `{base_url}/user_1_a/settings/volume.json`.
//!
//! Writes (`set`, `push`) propagate store failures. Reads and deletes degrade
//! instead: `get` answers `None` and `delete` answers `false`, with the
//! failure logged at `warn`. Use [`KeyedStore::fetch`] to observe read
//! failures directly.
//!
//! `push` is a read-modify-write over two requests and is not atomic; two
//! writers pushing to the same key can lose an element.

use crate::config::ManagerOptions;
use crate::error::{StorageError, StorageResult};
use crate::storage::adapter::Database;
use crate::storage::storage_api::{utils, DocumentTransport, StorageBackend};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Keyed store adapter scoped to one client namespace
#[derive(Debug, Clone)]
pub struct KeyedStore<T> {
    transport: T,
    database_url: String,
    namespace: String,
    disabled: bool,
}

impl<T: DocumentTransport> KeyedStore<T> {
    /// Create a keyed store for the manager described by `options`
    pub fn new(transport: T, database_url: impl Into<String>, options: &ManagerOptions) -> Self {
        Self {
            transport,
            database_url: database_url.into(),
            namespace: utils::sanitize_namespace(options.client_id.as_deref()),
            disabled: options.storage_disabled(),
        }
    }

    /// Sanitized namespace root
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Base URL of the store
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Whether every operation is a no-op
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Full resource URL for a logical key
    pub fn resource_url(&self, key: &str) -> StorageResult<String> {
        let path = utils::namespaced_path(&self.namespace, key)?;
        Ok(utils::resource_url(&self.database_url, &path))
    }

    /// Store `value` under `key`
    pub async fn set<V: Serialize + ?Sized>(&self, key: &str, value: &V) -> StorageResult<()> {
        if self.disabled {
            return Ok(());
        }
        let url = self.resource_url(key)?;
        let value = serde_json::to_value(value)?;
        self.transport.write(&url, &value).await?;
        Ok(())
    }

    /// Retrieve the value under `key`, or `None` when nothing is stored or
    /// the store could not be read
    pub async fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        if self.disabled {
            return Ok(None);
        }
        let url = self.resource_url(key)?;
        match self.read_url(&url).await {
            Ok(value) => Ok(value),
            Err(error) => {
                warn!(key, %error, "store read failed; treating as absent");
                Ok(None)
            }
        }
    }

    /// Retrieve and deserialize the value under `key`
    pub async fn get_as<V: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<V>> {
        match self.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Like [`get`](Self::get), but store failures are returned
    pub async fn fetch(&self, key: &str) -> StorageResult<Option<Value>> {
        if self.disabled {
            return Ok(None);
        }
        let url = self.resource_url(key)?;
        self.read_url(&url).await
    }

    /// Append `value` to the array under `key`, creating it when absent
    pub async fn push<V: Serialize + ?Sized>(&self, key: &str, value: &V) -> StorageResult<()> {
        if self.disabled {
            return Ok(());
        }
        let value = serde_json::to_value(value)?;
        let mut items = match self.fetch(key).await {
            Ok(None) | Err(StorageError::NotFound { .. }) => Vec::new(),
            Ok(Some(Value::Array(items))) => items,
            Ok(Some(_)) => {
                return Err(StorageError::NotAnArray {
                    key: key.to_string(),
                })
            }
            Err(error) => return Err(error),
        };
        items.push(value);
        self.set(key, &items).await
    }

    /// Remove the value under `key`; `false` when the store refused
    pub async fn delete(&self, key: &str) -> StorageResult<bool> {
        if self.disabled {
            return Ok(false);
        }
        let url = self.resource_url(key)?;
        match self.transport.write(&url, &Value::Null).await {
            Ok(_) => Ok(true),
            Err(error) => {
                warn!(key, %error, "store delete failed");
                Ok(false)
            }
        }
    }

    async fn read_url(&self, url: &str) -> StorageResult<Option<Value>> {
        match self.transport.read(url).await? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }
}

#[async_trait]
impl<T: DocumentTransport + 'static> Database for KeyedStore<T> {
    async fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        KeyedStore::set(self, key, &value).await
    }

    async fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        KeyedStore::get(self, key).await
    }

    async fn push(&self, key: &str, value: Value) -> StorageResult<()> {
        KeyedStore::push(self, key, &value).await
    }

    async fn delete(&self, key: &str) -> StorageResult<bool> {
        KeyedStore::delete(self, key).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Firebase
    }
}
