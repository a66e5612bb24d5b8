//! Memory database backend

use crate::config::ManagerOptions;
use crate::error::{StorageError, StorageResult};
use crate::storage::adapter::Database;
use crate::storage::storage_api::{utils, StorageBackend};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process database, the manager's backend when no plugin replaces it
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    data: Arc<RwLock<HashMap<String, Value>>>,
    disabled: bool,
}

impl MemoryDatabase {
    /// Create a new, enabled memory database
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory database honoring the manager's disable/resume flags
    pub fn with_options(options: &ManagerOptions) -> Self {
        Self {
            data: Arc::default(),
            disabled: options.storage_disabled(),
        }
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        if self.disabled {
            return Ok(());
        }
        let path = utils::key_to_path(key)?;
        let mut data = self.data.write().await;
        if value.is_null() {
            data.remove(&path);
        } else {
            data.insert(path, value);
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        if self.disabled {
            return Ok(None);
        }
        let path = utils::key_to_path(key)?;
        Ok(self.data.read().await.get(&path).cloned())
    }

    async fn push(&self, key: &str, value: Value) -> StorageResult<()> {
        if self.disabled {
            return Ok(());
        }
        let path = utils::key_to_path(key)?;
        let mut data = self.data.write().await;
        match data.entry(path).or_insert_with(|| Value::Array(Vec::new())) {
            Value::Array(items) => {
                items.push(value);
                Ok(())
            }
            _ => Err(StorageError::NotAnArray {
                key: key.to_string(),
            }),
        }
    }

    async fn delete(&self, key: &str) -> StorageResult<bool> {
        if self.disabled {
            return Ok(false);
        }
        let path = utils::key_to_path(key)?;
        self.data.write().await.remove(&path);
        Ok(true)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
