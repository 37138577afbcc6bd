//! Plugin Discovery
//!
//! Scans a plugin directory and instantiates the plugins registered by each
//! module found there. A missing directory is the only error that aborts
//! discovery; a module that fails to load is recorded as a [`LoadFailure`],
//! logged, and skipped.
//!
//! Discovery is lazy and single-pass: candidate modules are listed once when
//! [`PluginDiscovery::discover`] is called, in ascending file name order, and
//! each module is only opened when the returned [`Discovery`] iterator reaches
//! it. A module registering several plugins yields them one after another.

use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::external::library::{ModuleLoader, NativeModuleLoader};
use crate::plugin::traits::Plugin;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Discover plugins in `directory` with the native module loader
pub fn discover(directory: &Path) -> PluginResult<Discovery> {
    PluginDiscovery::new().discover(directory)
}

/// Configuration for plugin discovery
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Plugin names to drop, compared case-insensitively
    pub excluded_plugins: Vec<String>,
}

/// Plugin discovery over a directory of modules
pub struct PluginDiscovery {
    config: DiscoveryConfig,
    loader: Box<dyn ModuleLoader>,
}

impl PluginDiscovery {
    /// Discovery using the platform's shared library loader
    pub fn new() -> Self {
        Self::with_loader(Box::new(NativeModuleLoader::new()))
    }

    /// Discovery using a specific module loader
    pub fn with_loader(loader: Box<dyn ModuleLoader>) -> Self {
        Self {
            config: DiscoveryConfig::default(),
            loader,
        }
    }

    /// Exclude plugins by name
    pub fn with_excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.excluded_plugins = excludes.into_iter().map(Into::into).collect();
        self
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Start discovery in `directory`
    ///
    /// Fails with [`PluginError::DirectoryNotFound`] when the directory does
    /// not exist. No module is loaded until the returned iterator is advanced.
    pub fn discover(self, directory: &Path) -> PluginResult<Discovery> {
        if !directory.is_dir() {
            return Err(PluginError::DirectoryNotFound {
                path: directory.to_path_buf(),
            });
        }

        let entries = std::fs::read_dir(directory).map_err(|source| PluginError::IoError {
            operation: "read plugin directory".to_string(),
            path: directory.to_path_buf(),
            source,
        })?;

        let extension = self.loader.module_extension().to_string();
        let mut candidates = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    log::warn!(
                        "Skipping unreadable entry in '{}': {}",
                        directory.display(),
                        e
                    );
                    continue;
                }
            };
            if is_candidate(&path, &extension) {
                candidates.push(path);
            } else {
                log::trace!("Ignoring non-module file {}", path.display());
            }
        }
        candidates.sort();

        log::debug!(
            "Found {} candidate plugin module(s) in {}",
            candidates.len(),
            directory.display()
        );

        Ok(Discovery {
            loader: self.loader,
            excluded: self
                .config
                .excluded_plugins
                .iter()
                .map(|name| name.to_lowercase())
                .collect(),
            candidates: candidates.into_iter(),
            pending: VecDeque::new(),
            failures: Vec::new(),
        })
    }
}

impl Default for PluginDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

fn is_candidate(path: &Path, extension: &str) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// A module that could not be loaded
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: PluginError,
}

/// Lazy sequence of discovered plugins
pub struct Discovery {
    loader: Box<dyn ModuleLoader>,
    excluded: Vec<String>,
    candidates: std::vec::IntoIter<PathBuf>,
    pending: VecDeque<Box<dyn Plugin>>,
    failures: Vec<LoadFailure>,
}

impl Discovery {
    /// Modules that failed to load so far
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// Number of modules not yet visited
    pub fn remaining_modules(&self) -> usize {
        self.candidates.len()
    }

    fn is_excluded(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.excluded.iter().any(|excluded| *excluded == name)
    }

    fn load_next_module(&mut self, path: PathBuf) {
        log::debug!("Loading plugin module {}", path.display());
        match self.loader.load_module(&path) {
            Ok(plugins) => {
                for plugin in plugins {
                    if self.is_excluded(plugin.name()) {
                        log::debug!("Excluding plugin '{}'", plugin.name());
                        continue;
                    }
                    log::debug!(
                        "Discovered plugin '{}' in {}",
                        plugin.name(),
                        path.display()
                    );
                    self.pending.push_back(plugin);
                }
            }
            Err(error) => {
                log::warn!(
                    "Error loading plugin from '{}': {}",
                    path.display(),
                    error
                );
                self.failures.push(LoadFailure { path, error });
            }
        }
    }
}

impl Iterator for Discovery {
    type Item = Box<dyn Plugin>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(plugin) = self.pending.pop_front() {
                return Some(plugin);
            }
            let path = self.candidates.next()?;
            self.load_next_module(path);
        }
    }
}

impl std::fmt::Debug for Discovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Discovery")
            .field("remaining_modules", &self.candidates.len())
            .field("pending", &self.pending.len())
            .field("failures", &self.failures)
            .finish()
    }
}
