//! Module-side panic containment
//!
//! A plugin module statically links its own copy of the standard library, so
//! a panic raised inside it cannot be caught by the host: it reaches the
//! host's unwinder as a foreign exception and aborts the process. Everything
//! here is therefore meant to run *inside* the module. `declare_plugin!`
//! routes registration through [`guard_registration`], which compiles this
//! code into the module and wraps every registered plugin in a
//! [`GuardedPlugin`] whose methods catch panics before they cross back into
//! the host.

use crate::plugin::external::abi::PluginRegistrar;
use crate::plugin::traits::Plugin;
use crate::plugin::types::{CommandMetadata, CommandResult};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Run a module's registration function, containing panics
///
/// Plugins registered before a panic are still handed to `registrar`; the
/// host discards them when it sees the error.
pub fn guard_registration(
    registrar: &mut dyn PluginRegistrar,
    register: fn(&mut dyn PluginRegistrar),
) -> Result<(), String> {
    let mut guarding = GuardingRegistrar { inner: registrar };
    panic::catch_unwind(AssertUnwindSafe(|| register(&mut guarding)))
        .map_err(|payload| panic_message(payload.as_ref()))
}

struct GuardingRegistrar<'a> {
    inner: &'a mut dyn PluginRegistrar,
}

impl PluginRegistrar for GuardingRegistrar<'_> {
    fn register_plugin(&mut self, plugin: Box<dyn Plugin>) {
        self.inner
            .register_plugin(Box::new(GuardedPlugin::new(plugin)));
    }
}

/// Plugin adapter that turns panics into failed results
///
/// The name is read once at construction, which happens inside the guarded
/// registration call.
pub struct GuardedPlugin {
    name: String,
    inner: Box<dyn Plugin>,
}

impl GuardedPlugin {
    pub fn new(inner: Box<dyn Plugin>) -> Self {
        Self {
            name: inner.name().to_string(),
            inner,
        }
    }
}

impl Plugin for GuardedPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute_command(&self, command_name: &str, args: &[String]) -> CommandResult {
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.inner.execute_command(command_name, args)
        }))
        .unwrap_or_else(|payload| {
            CommandResult::failure(panicked_message(
                &self.name,
                command_name,
                payload.as_ref(),
            ))
        })
    }

    // A plugin that cannot describe itself shows no commands
    fn list_commands(&self) -> Vec<CommandMetadata> {
        panic::catch_unwind(AssertUnwindSafe(|| self.inner.list_commands()))
            .unwrap_or_default()
    }
}

/// Failure text for a command that panicked
pub(crate) fn panicked_message(
    plugin_name: &str,
    command_name: &str,
    payload: &(dyn Any + Send),
) -> String {
    format!(
        "Plugin '{}' panicked while executing '{}': {}",
        plugin_name,
        command_name,
        panic_message(payload)
    )
}

/// Best effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
