//! Plugin host model
//!
//! The client manager keeps a registry of named, swappable implementation
//! slots ("structures"). A plugin replaces the implementation of a slot when
//! it loads and restores the default when it unloads. This crate only needs
//! the `Database` slot.
//!
//! ```rust
//! use firebase_store::config::{ManagerOptions, PluginOptions};
//! use firebase_store::plugin::{FirebasePlugin, PluginHost};
//! use firebase_store::storage::StorageBackend;
//!
//! # fn main() -> firebase_store::Result<()> {
//! let mut host = PluginHost::new();
//! host.load(Box::new(FirebasePlugin::new(PluginOptions::with_url(
//!     "https://my-app.firebaseio.com",
//! ))))?;
//!
//! let database = host.structures().create_database(&ManagerOptions::default());
//! assert_eq!(database.backend_type(), StorageBackend::Firebase);
//!
//! host.unload("firebase-store")?;
//! assert_eq!(host.structures().database_backend(), StorageBackend::Memory);
//! # Ok(())
//! # }
//! ```

pub mod firebase;

pub use firebase::FirebasePlugin;

use crate::config::ManagerOptions;
use crate::error::{PluginError, Result};
use crate::storage::{Database, MemoryDatabase, StorageBackend};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Name of the database structure slot
pub const DATABASE_STRUCTURE: &str = "Database";

/// Builds the manager's database from its options
pub type DatabaseFactory = Arc<dyn Fn(&ManagerOptions) -> Arc<dyn Database> + Send + Sync>;

/// Registry of swappable implementations
pub struct Structures {
    database: DatabaseFactory,
    database_backend: StorageBackend,
}

impl Default for Structures {
    fn default() -> Self {
        Self {
            database: default_database_factory(),
            database_backend: StorageBackend::Memory,
        }
    }
}

impl fmt::Debug for Structures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Structures")
            .field("database_backend", &self.database_backend)
            .finish_non_exhaustive()
    }
}

impl Structures {
    /// Registry with every slot at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the database implementation
    pub fn extend_database(&mut self, backend: StorageBackend, factory: DatabaseFactory) {
        info!(structure = DATABASE_STRUCTURE, ?backend, "structure extended");
        self.database = factory;
        self.database_backend = backend;
    }

    /// Restore the default database implementation
    pub fn restore_default_database(&mut self) {
        info!(structure = DATABASE_STRUCTURE, "structure restored to default");
        self.database = default_database_factory();
        self.database_backend = StorageBackend::Memory;
    }

    /// Build a database from the active implementation
    pub fn create_database(&self, options: &ManagerOptions) -> Arc<dyn Database> {
        (self.database)(options)
    }

    /// Backend of the active database implementation
    pub fn database_backend(&self) -> StorageBackend {
        self.database_backend
    }
}

fn default_database_factory() -> DatabaseFactory {
    Arc::new(|options: &ManagerOptions| {
        Arc::new(MemoryDatabase::with_options(options)) as Arc<dyn Database>
    })
}

/// A unit of functionality the host can load and unload
pub trait Plugin: Send + Sync {
    /// Unique plugin name
    fn name(&self) -> &str;

    /// Plugin version
    fn version(&self) -> &str;

    /// One-line description
    fn description(&self) -> &str;

    /// Plugin author
    fn author(&self) -> &str;

    /// Install the plugin's implementations
    fn load(&self, structures: &mut Structures) -> Result<()>;

    /// Remove the plugin's implementations
    fn unload(&self, structures: &mut Structures) -> Result<()>;
}

/// Owns the structure registry and the loaded plugins
#[derive(Default)]
pub struct PluginHost {
    structures: Structures,
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginHost {
    /// Host with default structures and no plugins
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a plugin. Nothing is registered when loading fails.
    pub fn load(&mut self, plugin: Box<dyn Plugin>) -> Result<()> {
        if self.plugins.iter().any(|p| p.name() == plugin.name()) {
            return Err(PluginError::AlreadyLoaded {
                name: plugin.name().to_string(),
            }
            .into());
        }
        plugin.load(&mut self.structures)?;
        info!(
            plugin = plugin.name(),
            version = plugin.version(),
            "plugin loaded"
        );
        self.plugins.push(plugin);
        Ok(())
    }

    /// Unload a plugin by name
    pub fn unload(&mut self, name: &str) -> Result<()> {
        let index = self
            .plugins
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| PluginError::NotLoaded {
                name: name.to_string(),
            })?;
        let plugin = self.plugins.remove(index);
        plugin.unload(&mut self.structures)?;
        info!(plugin = name, "plugin unloaded");
        Ok(())
    }

    /// Names of loaded plugins, in load order
    pub fn loaded(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// The structure registry
    pub fn structures(&self) -> &Structures {
        &self.structures
    }
}
