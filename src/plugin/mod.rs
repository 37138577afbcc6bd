//! Plugin System Module
//!
//! Discovers plugin modules in a directory, keeps the loaded plugins in a
//! registry, dispatches CLI invocations to them and renders their help from
//! the command metadata they publish.

// Internal modules - all access should go through api module
pub(crate) mod discovery;
pub(crate) mod dispatch;
pub(crate) mod error;
pub(crate) mod external;
pub(crate) mod help;
pub(crate) mod registry;
pub(crate) mod traits;
pub(crate) mod types;

// Public API module - the only public interface for the plugin system
pub mod api;

#[cfg(test)]
mod tests;
