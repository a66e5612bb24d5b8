//! In-memory document transport
//!
//! Mirrors the REST store's behavior closely enough to run the keyed store
//! without a network. All documents live in one JSON tree addressed by the
//! resource URL's path segments, so parent and child paths see each other:
//! reading a parent returns its children as a nested object, deleting a
//! parent removes every child, and emptied parents are pruned.
//!
//! Writes are partial updates: an object merges its top-level keys into the
//! node (a null key removes that child), anything else replaces the node.
//! Failures can be injected and calls that reach the transport are counted.

use crate::error::{StorageError, StorageResult};
use crate::storage::constants::JSON_SUFFIX;
use crate::storage::storage_api::{utils, DocumentTransport};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct InjectedFailure {
    status: u16,
    body: String,
}

/// Document transport over a process-local JSON tree
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    root: Arc<RwLock<Value>>,
    failure: Arc<RwLock<Option<InjectedFailure>>>,
    requests: Arc<AtomicUsize>,
}

impl MemoryTransport {
    /// Create an empty memory transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every following call as if the store answered `status`
    pub async fn fail_with(&self, status: u16, body: impl Into<String>) {
        *self.failure.write().await = Some(InjectedFailure {
            status,
            body: body.into(),
        });
    }

    /// Stop injecting failures
    pub async fn clear_failure(&self) {
        *self.failure.write().await = None;
    }

    /// Number of calls that reached the transport
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Raw stored JSON at a resource URL, before unwrapping
    pub async fn stored(&self, resource_url: &str) -> Option<Value> {
        let segments = segments(resource_url);
        let root = self.root.read().await;
        lookup(&root, &segments).filter(|v| !v.is_null()).cloned()
    }

    async fn begin(&self, url: &str) -> StorageResult<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.failure.read().await.as_ref() {
            Some(failure) => Err(StorageError::from_status(
                failure.status,
                utils::display_path(url),
                failure.body.clone(),
            )),
            None => Ok(()),
        }
    }
}

/// Path segments of a resource URL, without the `.json` suffix
fn segments(resource_url: &str) -> Vec<String> {
    let path = utils::display_path(resource_url);
    let path = path.strip_suffix(JSON_SUFFIX).unwrap_or(path);
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn lookup<'a>(root: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments.iter().try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn is_vacant(node: &Value) -> bool {
    match node {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn merge(node: &mut Value, patch: Value) {
    match (node, patch) {
        (Value::Object(existing), Value::Object(fields)) => {
            for (key, value) in fields {
                if value.is_null() {
                    existing.remove(&key);
                } else {
                    existing.insert(key, value);
                }
            }
        }
        (node, Value::Object(fields)) => {
            *node = Value::Object(fields.into_iter().filter(|(_, v)| !v.is_null()).collect());
        }
        (node, patch) => *node = patch,
    }
}

fn patch_at(node: &mut Value, segments: &[String], patch: Value) {
    let Some((head, rest)) = segments.split_first() else {
        merge(node, patch);
        return;
    };
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        let child = map.entry(head.clone()).or_insert(Value::Null);
        patch_at(child, rest, patch);
        if is_vacant(child) {
            map.remove(head);
        }
    }
}

fn remove_at(node: &mut Value, segments: &[String]) {
    let Some((head, rest)) = segments.split_first() else {
        *node = Value::Null;
        return;
    };
    if let Value::Object(map) = node {
        if let Some(child) = map.get_mut(head) {
            remove_at(child, rest);
            if is_vacant(child) {
                map.remove(head);
            }
        }
    }
}

impl DocumentTransport for MemoryTransport {
    async fn write(&self, resource_url: &str, value: &Value) -> StorageResult<Value> {
        let url = utils::ensure_json_suffix(resource_url);
        self.begin(&url).await?;

        let segments = segments(&url);
        let mut root = self.root.write().await;
        if value.is_null() {
            remove_at(&mut root, &segments);
            return Ok(Value::Null);
        }

        let incoming = utils::wrap_value(value);
        patch_at(&mut root, &segments, incoming.clone());
        Ok(incoming)
    }

    async fn read(&self, resource_url: &str) -> StorageResult<Value> {
        let url = utils::ensure_json_suffix(resource_url);
        self.begin(&url).await?;

        let root = self.root.read().await;
        Ok(lookup(&root, &segments(&url))
            .cloned()
            .map(utils::unwrap_value)
            .unwrap_or(Value::Null))
    }
}
