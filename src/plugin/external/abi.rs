//! Plugin module ABI
//!
//! A plugin module is a `cdylib` that links against this crate and exports a
//! single well-known static, [`PLUGIN_DECLARATION_SYMBOL`], describing the API
//! version it was built against and the function that registers its plugins.
//! Modules normally produce the static with [`declare_plugin!`](crate::declare_plugin).
//!
//! Plugins cross the library boundary as `Box<dyn Plugin>`, which is only
//! sound when host and module agree on the plugin API version and were built
//! by the same compiler. The loader checks both before calling `register`.
//!
//! Panics must not unwind out of a module. The entry point therefore returns
//! registration failures as an `Err`, and `declare_plugin!` wraps registration
//! and every plugin in module-side guards (see [`guard`](super::guard)).

use crate::core::version;
use crate::plugin::traits::Plugin;

/// Name of the exported declaration static, NUL terminated for symbol lookup
pub const PLUGIN_DECLARATION_SYMBOL: &[u8] = b"plughost_plugin_declaration\0";

/// Sink a module registers its plugins into
pub trait PluginRegistrar {
    fn register_plugin(&mut self, plugin: Box<dyn Plugin>);
}

/// Registration entry point; `Err` carries the reason registration failed
pub type RegisterFn = fn(&mut dyn PluginRegistrar) -> Result<(), String>;

/// Exported module descriptor
#[derive(Copy, Clone)]
pub struct PluginDeclaration {
    /// Plugin API version the module was compiled against
    pub api_version: &'static str,
    /// `rustc --version` of the compiler that built the module
    pub rustc_version: &'static str,
    /// Registration entry point
    pub register: RegisterFn,
}

impl PluginDeclaration {
    /// Declaration stamped with this build's API and compiler versions
    pub const fn current(register: RegisterFn) -> Self {
        Self {
            api_version: version::PLUGIN_API_VERSION,
            rustc_version: version::RUSTC_VERSION,
            register,
        }
    }
}

impl std::fmt::Debug for PluginDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDeclaration")
            .field("api_version", &self.api_version)
            .field("rustc_version", &self.rustc_version)
            .finish()
    }
}

/// Registrar that simply collects plugins in registration order
#[derive(Default)]
pub struct CollectingRegistrar {
    plugins: Vec<Box<dyn Plugin>>,
}

impl CollectingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_plugins(self) -> Vec<Box<dyn Plugin>> {
        self.plugins
    }
}

impl PluginRegistrar for CollectingRegistrar {
    fn register_plugin(&mut self, plugin: Box<dyn Plugin>) {
        log::trace!("Module registered plugin '{}'", plugin.name());
        self.plugins.push(plugin);
    }
}

/// Export the plugin declaration symbol from a plugin module
///
/// Either list plugin values to register:
///
/// ```rust,ignore
/// plughost::declare_plugin!(HttpPlugin::new(), MessageBoxPlugin);
/// ```
///
/// or name a registration function for modules that need more control.
/// Either way a panic during registration or inside a plugin method is
/// caught within the module:
///
/// ```rust,ignore
/// fn register(registrar: &mut dyn plughost::plugin::api::PluginRegistrar) {
///     registrar.register_plugin(Box::new(HttpPlugin::new()));
/// }
/// plughost::declare_plugin!(register: register);
/// ```
#[macro_export]
macro_rules! declare_plugin {
    (register: $register:path) => {
        #[doc(hidden)]
        fn __plughost_guarded_register(
            registrar: &mut dyn $crate::plugin::api::PluginRegistrar,
        ) -> ::std::result::Result<(), ::std::string::String> {
            $crate::plugin::api::guard_registration(registrar, $register)
        }

        #[doc(hidden)]
        #[no_mangle]
        #[allow(non_upper_case_globals)]
        pub static plughost_plugin_declaration: $crate::plugin::api::PluginDeclaration =
            $crate::plugin::api::PluginDeclaration::current(__plughost_guarded_register);
    };
    ($($plugin:expr),+ $(,)?) => {
        #[doc(hidden)]
        fn __plughost_register(registrar: &mut dyn $crate::plugin::api::PluginRegistrar) {
            $( registrar.register_plugin(::std::boxed::Box::new($plugin)); )+
        }
        $crate::declare_plugin!(register: __plughost_register);
    };
}
