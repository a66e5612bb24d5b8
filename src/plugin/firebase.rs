//! Firebase Realtime Database plugin

use crate::config::{ManagerOptions, PluginOptions};
use crate::error::Result;
use crate::plugin::{Plugin, Structures};
use crate::storage::{Database, HttpTransport, KeyedStore, StorageBackend};
use std::sync::Arc;
use tracing::info;

/// Swaps the manager's database for a [`KeyedStore`] over HTTP.
///
/// Loading fails when no usable database URL is configured.
#[derive(Debug, Clone)]
pub struct FirebasePlugin {
    options: PluginOptions,
}

impl FirebasePlugin {
    /// Plugin name
    pub const NAME: &'static str = "firebase-store";

    /// Create the plugin
    pub fn new(options: PluginOptions) -> Self {
        Self { options }
    }

    /// Plugin options
    pub fn options(&self) -> &PluginOptions {
        &self.options
    }
}

impl Plugin for FirebasePlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> &str {
        crate::VERSION
    }

    fn description(&self) -> &str {
        "Firebase integration"
    }

    fn author(&self) -> &str {
        "Michal Lipinski"
    }

    fn load(&self, structures: &mut Structures) -> Result<()> {
        let database_url = self.options.validated_url()?;
        let transport = HttpTransport::new(self.options.storage.clone())?;
        info!(timeout = ?self.options.storage.timeout, "firebase database registered");

        structures.extend_database(
            StorageBackend::Firebase,
            Arc::new(move |options: &ManagerOptions| {
                Arc::new(KeyedStore::new(transport.clone(), database_url.clone(), options))
                    as Arc<dyn Database>
            }),
        );
        Ok(())
    }

    fn unload(&self, structures: &mut Structures) -> Result<()> {
        structures.restore_default_database();
        Ok(())
    }
}
