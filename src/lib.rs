//! # firebase-store
//!
//! A keyed JSON storage backend for plugin-driven client managers. Values are
//! persisted to a Firebase Realtime Database through its REST API, scoped
//! under a namespace derived from the manager's client identifier.
//!
//! ## Features
//!
//! - **Storage Module**: Keyed set/get/push/delete over HTTP or in-memory transports
//! - **Plugin Module**: Structure registry and the plugin that swaps in the Firebase backend
//! - **Config Module**: Manager and plugin options, loadable from the environment
//!
//! ## Optional Features
//!
//! - `cli`: The `firebase-store` command line tool
//!
//! ## Example
//!
//! ```rust,no_run
//! use firebase_store::prelude::*;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> firebase_store::Result<()> {
//! let mut host = PluginHost::new();
//! host.load(Box::new(FirebasePlugin::new(PluginOptions::from_env()?)))?;
//!
//! let database = host.structures().create_database(&ManagerOptions::from_env()?);
//! database.set("settings.volume", json!(42)).await?;
//! let volume = database.get("settings.volume").await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core error types
pub use error::{Error, PluginError, Result, StorageError, StorageResult};

// Core modules
pub mod config;
pub mod error;
pub mod logging;
pub mod plugin;
pub mod storage;

// Re-export commonly used types
pub mod prelude {
    //! Common types and traits for convenient importing

    pub use crate::config::{ManagerOptions, PluginOptions};
    pub use crate::error::{Error, Result, StorageError, StorageResult};
    pub use crate::plugin::{FirebasePlugin, Plugin, PluginHost, Structures};
    pub use crate::storage::{
        Database, DocumentTransport, HttpTransport, KeyedStore, MemoryDatabase, MemoryTransport,
        StorageBackend, StorageConfig,
    };
}

// Version information
/// The version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
