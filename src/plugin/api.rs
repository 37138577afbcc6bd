//! Public API for the plugin system
//!
//! Plugin modules and the host binary import from here rather than from the
//! internal modules.

// Plugin contract and metadata
pub use crate::plugin::traits::Plugin;
pub use crate::plugin::types::{
    CommandMetadata, CommandResult, DiscreteValue, Parameter, TypeDescriptor,
};

// Module ABI
pub use crate::plugin::external::abi::{
    CollectingRegistrar, PluginDeclaration, PluginRegistrar, RegisterFn,
    PLUGIN_DECLARATION_SYMBOL,
};
pub use crate::plugin::external::guard::{guard_registration, GuardedPlugin};
pub use crate::plugin::external::library::{ModuleLoader, NativeModuleLoader};

// Discovery and registry
pub use crate::plugin::discovery::{discover, Discovery, DiscoveryConfig, LoadFailure, PluginDiscovery};
pub use crate::plugin::registry::PluginRegistry;

// Dispatch and help
pub use crate::plugin::dispatch::{Dispatcher, Outcome, HELP_COMMAND};
pub use crate::plugin::help::{HelpRenderer, OutputFormat, USAGE_BANNER};

// Error handling
pub use crate::plugin::error::{PluginError, PluginResult};
