//! Error types for the firebase-store library
//!
//! This module provides a unified error handling system using `thiserror` for
//! all components of the library.

use thiserror::Error;

/// Remediation text attached to every permission-denied failure.
pub const PERMISSION_DENIED_HINT: &str = "To allow access temporarily, follow these steps:\n\
1) Log in to your Firebase Console.\n\
2) Navigate to Realtime Database -> Rules.\n\
3) Set both .read and .write rules to true, for example:\n\
{\n  \"rules\": {\n    \".read\": true,\n    \".write\": true\n  }\n}\n\
For security, store your database URL in an environment variable.";

/// The main error type for the firebase-store library
#[derive(Error, Debug)]
pub enum Error {
    /// Storage operation errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Plugin lifecycle errors
    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        /// What was missing or malformed
        message: String,
    },
}

impl Error {
    /// Build a configuration error from any message
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Empty or absent logical key
    #[error("Key cannot be empty")]
    InvalidKey,

    /// Key contains characters that would change the request URL's path
    #[error("Key contains characters not allowed in a store path: {key:?}")]
    UnsafeKey {
        /// The rejected key
        key: String,
    },

    /// `push` target holds something other than an array
    #[error("Key does not point to an array: {key}")]
    NotAnArray {
        /// The logical key that was pushed to
        key: String,
    },

    /// The store answered 404
    #[error("404: Resource not found: {resource}")]
    NotFound {
        /// Store path of the request
        resource: String,
    },

    /// The store answered 403
    #[error("Permission denied: {resource}\n{}", PERMISSION_DENIED_HINT)]
    PermissionDenied {
        /// Store path of the request
        resource: String,
    },

    /// Any other non-success status
    #[error("Error {status}: {body}")]
    StoreError {
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },

    /// The request never produced a response
    #[error("Transport error: {reason}")]
    Transport {
        /// Underlying client error
        reason: String,
    },

    /// The response body was not valid JSON
    #[error("Failed to decode response: {reason}")]
    Decode {
        /// Parser error
        reason: String,
    },

    /// A typed value could not be converted to or from JSON
    #[error("Serialization failed: {reason}")]
    Serialization {
        /// serde_json error
        reason: String,
    },
}

impl StorageError {
    /// Map a non-success HTTP status and its body to the matching error.
    pub fn from_status(status: u16, resource: &str, body: String) -> Self {
        match status {
            404 => StorageError::NotFound {
                resource: resource.to_string(),
            },
            403 => StorageError::PermissionDenied {
                resource: resource.to_string(),
            },
            _ => StorageError::StoreError { status, body },
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Plugin-specific error types
#[derive(Error, Debug)]
pub enum PluginError {
    /// A plugin with this name is already active
    #[error("Plugin already loaded: {name}")]
    AlreadyLoaded {
        /// Plugin name
        name: String,
    },

    /// No plugin with this name is active
    #[error("Plugin not loaded: {name}")]
    NotLoaded {
        /// Plugin name
        name: String,
    },
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience type alias for Storage Results
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Convenience type alias for Plugin Results
pub type PluginResult<T> = std::result::Result<T, PluginError>;
