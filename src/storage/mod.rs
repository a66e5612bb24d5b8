//! Storage module for keyed JSON persistence
//!
//! This module provides the keyed storage interface used by the client
//! manager and its implementations:
//! - **HTTP transport** - Talks to a Firebase Realtime Database over its REST API
//! - **Memory transport** - In-process document store with the same contract
//! - **Keyed store** - Namespaced set/get/push/delete on top of a transport
//! - **Memory database** - The manager's default process-local backend
//!
//! # Examples
//!
//! ```rust
//! use firebase_store::config::ManagerOptions;
//! use firebase_store::storage::{KeyedStore, MemoryTransport};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let options = ManagerOptions {
//!     client_id: Some("user.1#a".to_string()),
//!     ..Default::default()
//! };
//! let store = KeyedStore::new(MemoryTransport::new(), "https://db.example.com", &options);
//!
//! store.set("settings.volume", &42).await?;
//! assert_eq!(store.get("settings.volume").await?, Some(json!(42)));
//!
//! store.push("queue", &"track-1").await?;
//! assert_eq!(store.get("queue").await?, Some(json!(["track-1"])));
//!
//! assert!(store.delete("queue").await?);
//! assert_eq!(store.get("queue").await?, None);
//! # Ok::<(), firebase_store::StorageError>(())
//! # }).unwrap();
//! ```

// Core storage API and types
pub mod storage_api;

// Storage interface implementations
pub mod adapter;
pub mod keyed_store;
pub mod memory_adapter;
pub mod storage_http;
pub mod storage_memory;

// Re-export main types for convenience
pub use storage_api::{DocumentTransport, StorageBackend, StorageConfig};

pub use adapter::Database;
pub use keyed_store::KeyedStore;
pub use memory_adapter::MemoryDatabase;
pub use storage_http::HttpTransport;
pub use storage_memory::MemoryTransport;

/// Storage constants
pub mod constants {
    //! Constants used throughout the storage module

    /// Suffix the REST API expects on every resource path
    pub const JSON_SUFFIX: &str = ".json";

    /// Object key bare strings are wrapped under
    pub const STRING_WRAPPER_KEY: &str = "default";

    /// Default timeout for storage operations in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
}
