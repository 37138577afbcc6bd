//! Core CLI arguments structure
//!
//! Global options must come before the plugin name. Everything from the
//! plugin name onwards is captured verbatim in `invocation`, including
//! arguments that look like flags, and handed to the dispatcher.

use crate::core::logging::LOG_LEVELS;
use crate::core::styles::palette_to_clap;
use crate::core::version;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

// Global arguments structure with all command-line options
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "plughost")]
#[command(about = "Extensible command-line host for plugin modules")]
#[command(version, long_version = version::long_version())]
#[command(styles = palette_to_clap(true))]
#[command(after_help = " * can be specified multiple times or as a comma-separated list")]
pub struct Args {
    /// Directory to load plugin modules from
    #[arg(short = 'p', long = "plugin-dir", value_name = "DIR")]
    pub plugin_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Plugins to exclude from discovery*
    #[arg(long = "exclude-plugin", value_name = "NAMES", action = ArgAction::Append)]
    pub plugin_exclusions: Vec<String>,

    /// Output format for the plugin listing and help pages
    #[arg(long = "format", value_name = "FORMAT", value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Force colored output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,

    /// More log output (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Log level
    #[arg(long = "log-level", value_name = "LEVEL", value_parser = LOG_LEVELS)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Also write log output to FILE (use 'none' to disable file logging)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Plugin name, command name and command arguments
    #[arg(
        value_name = "PLUGIN [COMMAND [ARGS]...]",
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub invocation: Vec<String>,
}

impl Args {
    /// Net verbosity: each `-v` raises, each `-q` lowers the log level by one step
    pub fn verbosity(&self) -> i8 {
        self.verbose.min(i8::MAX as u8) as i8 - self.quiet.min(i8::MAX as u8) as i8
    }

    /// Exclusions split on commas, trimmed and de-duplicated in order
    pub fn plugin_exclusions(&self) -> Vec<String> {
        parse_comma_separated_strings(&self.plugin_exclusions)
    }

    /// Log file unless disabled with `none`
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .filter(|path| path.as_os_str() != "none")
    }
}

/// Split comma separated values, dropping empties and duplicates
pub fn parse_comma_separated_strings(strings: &[String]) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for part in strings.iter().flat_map(|s| s.split(',')) {
        let part = part.trim();
        if !part.is_empty() && !parts.iter().any(|existing| existing == part) {
            parts.push(part.to_string());
        }
    }
    parts
}
