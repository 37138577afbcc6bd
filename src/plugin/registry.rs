//! Plugin Registry
//!
//! The realized set of loaded plugins, kept in discovery order. Names are
//! resolved case-insensitively; when two plugins share a name the one
//! registered first wins and the later one is only reachable by iteration.

use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::traits::Plugin;

/// Registry of loaded plugins
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.plugin_names())
            .finish()
    }
}

impl PluginRegistry {
    /// Create a new empty plugin registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin after those already present
    pub fn register_plugin(&mut self, plugin: Box<dyn Plugin>) {
        if let Some(existing) = self.find(plugin.name()) {
            log::warn!(
                "Plugin name '{}' is already taken by '{}'; the later plugin will not be reachable by name",
                plugin.name(),
                existing.name()
            );
        }
        self.plugins.push(plugin);
    }

    /// Resolve a plugin by case-insensitive name
    pub fn resolve(&self, name: &str) -> PluginResult<&dyn Plugin> {
        self.find(name).ok_or_else(|| PluginError::PluginNotFound {
            plugin_name: name.to_string(),
        })
    }

    /// Check if a plugin exists in the registry
    pub fn has_plugin(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Plugin names in registration order
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn plugins(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.iter().map(|p| p.as_ref())
    }

    /// Get total count of registered plugins
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    fn find(&self, name: &str) -> Option<&dyn Plugin> {
        let wanted = name.to_lowercase();
        self.plugins
            .iter()
            .find(|p| p.name().to_lowercase() == wanted)
            .map(|p| p.as_ref())
    }
}

impl FromIterator<Box<dyn Plugin>> for PluginRegistry {
    fn from_iter<I: IntoIterator<Item = Box<dyn Plugin>>>(iter: I) -> Self {
        let mut registry = PluginRegistry::new();
        for plugin in iter {
            registry.register_plugin(plugin);
        }
        registry
    }
}

impl Extend<Box<dyn Plugin>> for PluginRegistry {
    fn extend<I: IntoIterator<Item = Box<dyn Plugin>>>(&mut self, iter: I) {
        for plugin in iter {
            self.register_plugin(plugin);
        }
    }
}
