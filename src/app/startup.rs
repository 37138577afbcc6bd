//! Application startup
//!
//! Wires the host together: arguments, configuration, logging, plugin
//! discovery and dispatch. Returns the process exit code.

use super::cli::args::Args;
use super::cli::config::{ConfigFile, Settings};
use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::core::logging::{init_logging, set_logging_level};
use crate::plugin::api::{Dispatcher, HelpRenderer, PluginDiscovery, PluginRegistry};
use clap::Parser;
use std::io::{self, IsTerminal, Write};

/// Exit code for errors that stop the host before or during dispatch
pub const EXIT_FATAL: i32 = 3;

/// Parse the process arguments and run the host
pub fn startup() -> i32 {
    run(Args::parse())
}

/// Run the host with already parsed arguments
pub fn run(args: Args) -> i32 {
    // Logging is not up yet, so configuration problems go straight to stderr
    let config = match ConfigFile::load(args.config_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report_early(&e);
            return EXIT_FATAL;
        }
    };

    let settings = match Settings::resolve(
        &args,
        config.as_ref().map(|(_, config)| config),
        io::stdout().is_terminal(),
    ) {
        Ok(settings) => settings,
        Err(e) => {
            report_early(&e);
            return EXIT_FATAL;
        }
    };

    colored::control::set_override(settings.color);

    if let Err(e) = init_logging(
        settings.log_level.as_deref(),
        settings.log_format,
        settings.log_file.as_deref(),
        settings.color,
    ) {
        eprintln!("Error: Failed to initialise logging: {}", e);
        return EXIT_FATAL;
    }
    if let Err(e) = set_logging_level(settings.log_level.as_deref(), settings.verbosity) {
        log::warn!("Could not adjust log level: {}", e);
    }

    log::info!("plughost {} starting", env!("CARGO_PKG_VERSION"));
    if let Some((path, _)) = &config {
        log::debug!("Loaded configuration from {}", path.display());
    }

    let registry = match load_plugins(&settings) {
        Some(registry) => registry,
        None => return EXIT_FATAL,
    };

    let renderer = HelpRenderer::new(settings.format, settings.color);
    let dispatcher = Dispatcher::new(&registry, renderer);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = dispatcher
        .run(&settings.invocation, &mut out)
        .and_then(|outcome| out.flush().map(|_| outcome));

    match outcome {
        Ok(outcome) => {
            log::debug!("Dispatch finished: {:?}", outcome);
            outcome.exit_code()
        }
        Err(e) => {
            log::error!("FATAL: Failed to write output: {}", e);
            EXIT_FATAL
        }
    }
}

/// Discover every plugin in the configured directory
///
/// Returns `None` after logging when discovery cannot start at all.
fn load_plugins(settings: &Settings) -> Option<PluginRegistry> {
    log::debug!("Loading plugins from {}", settings.plugin_dir.display());
    if !settings.excluded_plugins.is_empty() {
        log::debug!("Excluding plugins: {}", settings.excluded_plugins.join(", "));
    }

    let mut discovery = match PluginDiscovery::new()
        .with_excludes(settings.excluded_plugins.iter().cloned())
        .discover(&settings.plugin_dir)
    {
        Ok(discovery) => discovery,
        Err(e) => {
            report_fatal(&e, "Plugin discovery");
            return None;
        }
    };

    let registry: PluginRegistry = discovery.by_ref().collect();

    log::info!(
        "Loaded {} plugin(s) from {}",
        registry.plugin_count(),
        settings.plugin_dir.display()
    );
    if !discovery.failures().is_empty() {
        log::info!(
            "{} module(s) in {} could not be loaded",
            discovery.failures().len(),
            settings.plugin_dir.display()
        );
    }

    Some(registry)
}

/// Report a fatal error through the logger, or straight to stderr when
/// error logging is switched off
fn report_fatal<E: ContextualError + std::fmt::Debug>(error: &E, operation_context: &str) {
    if log::log_enabled!(log::Level::Error) {
        log_error_with_context(error, operation_context);
    } else {
        match error.user_message() {
            Some(message) => eprintln!("Error: {}", message),
            None => eprintln!("Error: {} failed: {}", operation_context, error),
        }
    }
}

fn report_early<E: ContextualError>(error: &E) {
    match error.user_message() {
        Some(message) => eprintln!("Error: {}", message),
        None => eprintln!("Error: Configuration failed: {}", error),
    }
}
