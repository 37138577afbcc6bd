//! Shared library loading
//!
//! [`ModuleLoader`] is the narrow platform layer between discovery and the
//! operating system: given a module path it returns the plugins that module
//! registers. [`NativeModuleLoader`] implements it with `libloading`, which
//! covers `dlopen` and `LoadLibrary` targets alike.

use crate::core::version;
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::external::abi::{
    CollectingRegistrar, PluginDeclaration, PLUGIN_DECLARATION_SYMBOL,
};
use crate::plugin::traits::Plugin;
use crate::plugin::external::guard::panic_message;
use libloading::Library;
use std::mem::ManuallyDrop;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Loads a single plugin module
pub trait ModuleLoader {
    /// File extension identifying candidate modules (without the dot)
    fn module_extension(&self) -> &str {
        std::env::consts::DLL_EXTENSION
    }

    /// Open `path` and return every plugin it registers
    fn load_module(&self, path: &Path) -> PluginResult<Vec<Box<dyn Plugin>>>;
}

/// Loader for native shared libraries exporting a [`PluginDeclaration`]
#[derive(Debug, Clone)]
pub struct NativeModuleLoader {
    api_version: String,
    rustc_version: String,
}

impl NativeModuleLoader {
    pub fn new() -> Self {
        Self {
            api_version: version::PLUGIN_API_VERSION.to_string(),
            rustc_version: version::RUSTC_VERSION.to_string(),
        }
    }

    /// Reject declarations built against another API or compiler
    pub(crate) fn check_compatibility(
        &self,
        path: &Path,
        declaration: &PluginDeclaration,
    ) -> PluginResult<()> {
        if declaration.api_version != self.api_version {
            return Err(PluginError::VersionIncompatible {
                path: path.to_path_buf(),
                message: format!(
                    "module targets plugin API {}, host provides {}",
                    declaration.api_version, self.api_version
                ),
            });
        }
        if declaration.rustc_version != self.rustc_version {
            return Err(PluginError::VersionIncompatible {
                path: path.to_path_buf(),
                message: format!(
                    "module built with '{}', host built with '{}'",
                    declaration.rustc_version, self.rustc_version
                ),
            });
        }
        Ok(())
    }
}

impl Default for NativeModuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleLoader for NativeModuleLoader {
    fn load_module(&self, path: &Path) -> PluginResult<Vec<Box<dyn Plugin>>> {
        // SAFETY: loading a library runs its initialisers; plugin modules are trusted input
        let library = unsafe { Library::new(path) }.map_err(|e| PluginError::LoadError {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;

        // SAFETY: the symbol is declared by `declare_plugin!` with this exact type
        let declaration: PluginDeclaration = unsafe {
            let symbol = library
                .get::<*const PluginDeclaration>(PLUGIN_DECLARATION_SYMBOL)
                .map_err(|e| PluginError::LoadError {
                    path: path.to_path_buf(),
                    cause: e.to_string(),
                })?;
            **symbol
        };

        self.check_compatibility(path, &declaration)?;

        // Once module code has run the library stays mapped until the process
        // exits, whether registration succeeds or not
        let _library = ManuallyDrop::new(library);
        register_plugins(path, &declaration)
    }
}

/// Run a declaration's registration entry point
///
/// Modules report their own panics through the returned `Err`. The
/// `catch_unwind` here only covers declarations living in the host binary.
/// A module that registers nothing is not a failure.
pub(crate) fn register_plugins(
    path: &Path,
    declaration: &PluginDeclaration,
) -> PluginResult<Vec<Box<dyn Plugin>>> {
    let mut registrar = CollectingRegistrar::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| (declaration.register)(&mut registrar)))
        .unwrap_or_else(|payload| Err(panic_message(payload.as_ref())));

    if let Err(cause) = outcome {
        return Err(PluginError::RegistrationFailed {
            path: path.to_path_buf(),
            cause,
        });
    }

    let plugins = registrar.into_plugins();
    if plugins.is_empty() {
        log::debug!("Module {} registered no plugins", path.display());
    }
    Ok(plugins)
}
