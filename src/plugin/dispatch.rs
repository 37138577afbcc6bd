//! Command dispatch
//!
//! Routes a CLI invocation `<plugin> [command] [args...]` to a plugin in the
//! registry. An empty invocation or a lone `help` prints the plugin listing,
//! `<plugin>` alone, `<plugin> help`, or any `help` among the arguments prints
//! the plugin's help page, and anything else runs the command.

use crate::plugin::external::guard::panicked_message;
use crate::plugin::help::HelpRenderer;
use crate::plugin::registry::PluginRegistry;
use crate::plugin::traits::Plugin;
use crate::plugin::types::CommandResult;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

/// Reserved command and argument that selects help output
pub const HELP_COMMAND: &str = "help";

/// Terminal state reached by a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Plugin listing was printed
    Listing,
    /// No plugin matched the requested name
    PluginNotFound { plugin_name: String },
    /// Plugin help page was printed
    Help { plugin_name: String },
    /// A command ran to completion
    Executed {
        plugin_name: String,
        command_name: String,
        result: CommandResult,
    },
}

impl Outcome {
    /// Process exit code for this outcome
    ///
    /// `0` for listings, help and successful commands, `1` when a command
    /// reports failure and `2` for an unknown plugin name.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Listing | Outcome::Help { .. } => 0,
            Outcome::Executed { result, .. } if result.success => 0,
            Outcome::Executed { .. } => 1,
            Outcome::PluginNotFound { .. } => 2,
        }
    }
}

/// Dispatches CLI arguments against a plugin registry
#[derive(Debug)]
pub struct Dispatcher<'a> {
    registry: &'a PluginRegistry,
    renderer: HelpRenderer,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a PluginRegistry, renderer: HelpRenderer) -> Self {
        Self { registry, renderer }
    }

    /// Dispatch `argv` (program name already stripped), writing all user
    /// facing output to `out`
    pub fn run(&self, argv: &[String], out: &mut dyn Write) -> io::Result<Outcome> {
        let (plugin_name, rest) = match argv {
            [] => return self.list_plugins(out),
            [only] if only == HELP_COMMAND => return self.list_plugins(out),
            [plugin_name, rest @ ..] => (plugin_name.as_str(), rest),
        };

        let plugin = match self.registry.resolve(plugin_name) {
            Ok(plugin) => plugin,
            Err(error) => {
                log::debug!("Lookup failed: {}", error);
                writeln!(out, "{}", error)?;
                return Ok(Outcome::PluginNotFound {
                    plugin_name: plugin_name.to_string(),
                });
            }
        };

        let (command_name, args) = match rest {
            [] => (HELP_COMMAND, rest),
            [command_name, args @ ..] => (command_name.as_str(), args),
        };

        if command_name == HELP_COMMAND || args.iter().any(|arg| arg == HELP_COMMAND) {
            log::debug!("Rendering help for plugin '{}'", plugin.name());
            self.renderer.render(plugin, out)?;
            return Ok(Outcome::Help {
                plugin_name: plugin.name().to_string(),
            });
        }

        log::debug!(
            "Executing '{}' on plugin '{}' with {} argument(s)",
            command_name,
            plugin.name(),
            args.len()
        );
        let result = execute_guarded(plugin, command_name, args);
        if !result.success {
            log::debug!(
                "Plugin '{}' reported failure for '{}': {}",
                plugin.name(),
                command_name,
                result.message
            );
        }
        if !result.silent {
            writeln!(out, "{}", result.message)?;
        }

        Ok(Outcome::Executed {
            plugin_name: plugin.name().to_string(),
            command_name: command_name.to_string(),
            result,
        })
    }

    fn list_plugins(&self, out: &mut dyn Write) -> io::Result<Outcome> {
        self.renderer
            .render_listing(&self.registry.plugin_names(), out)?;
        Ok(Outcome::Listing)
    }
}

/// Run a command, turning a plugin panic into a failed result
///
/// Only panics of plugins compiled into the host unwind this far. Plugins
/// from shared library modules are wrapped in a module-side `GuardedPlugin`
/// and report panics as an ordinary failed result.
fn execute_guarded(plugin: &dyn Plugin, command_name: &str, args: &[String]) -> CommandResult {
    match panic::catch_unwind(AssertUnwindSafe(|| {
        plugin.execute_command(command_name, args)
    })) {
        Ok(result) => result,
        Err(payload) => {
            let message = panicked_message(plugin.name(), command_name, payload.as_ref());
            log::error!("{}", message);
            CommandResult::failure(message)
        }
    }
}
