//! Plugin Trait
//!
//! The capability set every plugin implements. The host only ever talks to
//! plugins through this trait: it reads the display name, asks for command
//! metadata to render help, and forwards a command invocation.
//!
//! Plugins are created once during discovery, live for the rest of the
//! process and are never mutated by the host, so every method takes `&self`.
//! Plugins that keep state between calls use interior mutability.

use crate::plugin::types::{CommandMetadata, CommandResult};

/// Base plugin trait that all plugins must implement
pub trait Plugin: Send + Sync {
    /// Display name, matched case-insensitively against the CLI argument
    fn name(&self) -> &str;

    /// Execute a command with its raw string arguments
    ///
    /// Unknown commands and malformed arguments should be reported as a
    /// failed `CommandResult` rather than by panicking.
    fn execute_command(&self, command_name: &str, args: &[String]) -> CommandResult;

    /// Metadata for every supported command, in display order
    fn list_commands(&self) -> Vec<CommandMetadata>;
}

impl std::fmt::Debug for dyn Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin").field("name", &self.name()).finish()
    }
}
