//! Manager and plugin configuration
//!
//! Options can be built directly or read from the environment. Environment
//! loading first applies a `.env` file when one exists:
//!
//! | Variable                    | Field                           |
//! |-----------------------------|---------------------------------|
//! | `FIREBASE_DATABASE_URL`     | [`PluginOptions::database_url`] |
//! | `FIREBASE_TIMEOUT_SECS`     | [`StorageConfig::timeout`]      |
//! | `FIREBASE_CLIENT_ID`        | [`ManagerOptions::client_id`]   |
//! | `FIREBASE_DISABLE_DATABASE` | [`ManagerOptions::disable_database`] |
//! | `FIREBASE_RESUME`           | [`ManagerOptions::resume`]      |

use crate::error::{Error, Result};
use crate::storage::StorageConfig;
use reqwest::Url;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the database URL
pub const ENV_DATABASE_URL: &str = "FIREBASE_DATABASE_URL";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "FIREBASE_TIMEOUT_SECS";
/// Environment variable holding the client identifier
pub const ENV_CLIENT_ID: &str = "FIREBASE_CLIENT_ID";
/// Environment variable holding the disable-storage flag
pub const ENV_DISABLE_DATABASE: &str = "FIREBASE_DISABLE_DATABASE";
/// Environment variable holding the resume flag
pub const ENV_RESUME: &str = "FIREBASE_RESUME";

/// Options the client manager hands to its database
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerOptions {
    /// Client identifier, used as the namespace root
    pub client_id: Option<String>,
    /// Turn storage off
    pub disable_database: bool,
    /// The manager is resuming earlier state; keeps storage on even when disabled
    pub resume: bool,
}

impl ManagerOptions {
    /// Whether storage operations should be skipped
    pub fn storage_disabled(&self) -> bool {
        self.disable_database && !self.resume
    }

    /// Read options from the process environment
    pub fn from_env() -> Result<Self> {
        load_dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read options through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            client_id: lookup(ENV_CLIENT_ID).filter(|id| !id.trim().is_empty()),
            disable_database: parse_flag(ENV_DISABLE_DATABASE, lookup(ENV_DISABLE_DATABASE))?,
            resume: parse_flag(ENV_RESUME, lookup(ENV_RESUME))?,
        })
    }
}

/// Options for the Firebase plugin
#[derive(Debug, Clone, Default)]
pub struct PluginOptions {
    /// Firebase Realtime Database URL, e.g. `https://my-app.firebaseio.com`
    pub database_url: Option<String>,
    /// HTTP transport settings
    pub storage: StorageConfig,
}

impl PluginOptions {
    /// Options for a database URL with default transport settings
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: Some(database_url.into()),
            storage: StorageConfig::default(),
        }
    }

    /// Read options from the process environment
    pub fn from_env() -> Result<Self> {
        load_dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read options through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut storage = StorageConfig::default();
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::configuration(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {raw:?}"))
            })?;
            if secs == 0 {
                return Err(Error::configuration(format!("{ENV_TIMEOUT_SECS} must be positive")));
            }
            storage.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            database_url: lookup(ENV_DATABASE_URL),
            storage,
        })
    }

    /// Return the validated database URL.
    ///
    /// Fails when the URL is missing, blank, or not an `http(s)` URL.
    pub fn validated_url(&self) -> Result<String> {
        let url = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                Error::configuration(
                    "Database URL is required. Please provide it in the plugin options \
                     and store it in an environment variable for better security.",
                )
            })?;

        let parsed = Url::parse(url)
            .map_err(|e| Error::configuration(format!("Invalid database URL: {e}")))?;
        if !matches!(parsed.scheme(), "https" | "http") {
            return Err(Error::configuration(format!(
                "Database URL must use https, got scheme {:?}",
                parsed.scheme()
            )));
        }

        Ok(url.trim_end_matches('/').to_string())
    }
}

/// Apply `.env` from the working directory or its parents, if any.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }
}

/// Apply a specific environment file.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<()> {
    dotenvy::from_path(path.as_ref()).map_err(|e| {
        Error::configuration(format!(
            "Failed to load environment file {}: {e}",
            path.as_ref().display()
        ))
    })
}

fn parse_flag(name: &str, raw: Option<String>) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => Err(Error::configuration(format!(
            "{name} must be a boolean (true/false/1/0/yes/no/on/off), got {raw:?}"
        ))),
    }
}
