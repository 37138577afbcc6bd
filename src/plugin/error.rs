//! Plugin Error Handling
//!
//! Error types for plugin discovery and loading. Only `DirectoryNotFound` is
//! fatal to a run; every other loading error is scoped to a single module and
//! recorded as a load failure while discovery continues.

use crate::core::error_handling::ContextualError;
use std::path::PathBuf;

/// Result type alias for plugin operations
pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// Error types for plugin system operations
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Plugin directory is missing
    #[error("Plugins directory '{}' not found.", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Plugin not found among loaded plugins
    #[error("Plugin '{plugin_name}' not found.")]
    PluginNotFound { plugin_name: String },

    /// Shared library could not be opened or lacks the entry symbol
    #[error("{cause}")]
    LoadError { path: PathBuf, cause: String },

    /// Module was built against a different plugin API or compiler
    #[error("Version incompatible: {message}")]
    VersionIncompatible { path: PathBuf, message: String },

    /// Module registration entry point panicked
    #[error("Registration failed: {cause}")]
    RegistrationFailed { path: PathBuf, cause: String },

    /// Filesystem error while scanning the plugin directory
    #[error("Failed to {operation} '{}': {source}", .path.display())]
    IoError {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PluginError {
    /// Module path the error relates to, if any
    pub fn module_path(&self) -> Option<&PathBuf> {
        match self {
            PluginError::LoadError { path, .. }
            | PluginError::VersionIncompatible { path, .. }
            | PluginError::RegistrationFailed { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl ContextualError for PluginError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            PluginError::DirectoryNotFound { .. } | PluginError::PluginNotFound { .. }
        )
    }

    fn user_message(&self) -> Option<String> {
        self.is_user_actionable().then(|| self.to_string())
    }
}
