//! Help rendering
//!
//! Turns plugin names and command metadata into the plugin listing and the
//! per-plugin help page, either as text (optionally colored) or as JSON.
//! Output goes to the writer supplied by the caller.

use crate::core::styles::StyleRole;
use crate::plugin::traits::Plugin;
use crate::plugin::types::{CommandMetadata, Parameter};
use serde::Serialize;
use std::io::{self, Write};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Usage lines shown under the plugin listing
pub const USAGE_BANNER: [&str; 3] = [
    "Usage: <plugin> <command> [args]",
    "Use '<plugin> help' to get a list of available commands for a plugin.",
    "Use '<plugin> <command> help' for help on a specific command.",
];

/// Output format for listings and help pages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct ListingDocument<'a> {
    plugins: &'a [&'a str],
    usage: &'a [&'a str],
}

#[derive(Serialize)]
struct HelpDocument<'a> {
    plugin: &'a str,
    commands: &'a [CommandMetadata],
}

/// Renders plugin listings and help pages
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpRenderer {
    format: OutputFormat,
    color: bool,
}

impl HelpRenderer {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Print the names of all plugins followed by the usage banner
    pub fn render_listing(&self, plugin_names: &[&str], out: &mut dyn Write) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(
                out,
                &ListingDocument {
                    plugins: plugin_names,
                    usage: &USAGE_BANNER,
                },
            ),
            OutputFormat::Text => {
                writeln!(out, "{}", self.paint(StyleRole::Header, "Available Plugins:"))?;
                for name in plugin_names {
                    writeln!(out, "- {}", self.paint(StyleRole::Key, name))?;
                }
                for line in USAGE_BANNER {
                    writeln!(out, "{}", self.paint(StyleRole::Dim, line))?;
                }
                Ok(())
            }
        }
    }

    /// Print every command of `plugin` with its parameters in declared order
    pub fn render(&self, plugin: &dyn Plugin, out: &mut dyn Write) -> io::Result<()> {
        let commands = plugin.list_commands();
        match self.format {
            OutputFormat::Json => write_json(
                out,
                &HelpDocument {
                    plugin: plugin.name(),
                    commands: &commands,
                },
            ),
            OutputFormat::Text => {
                writeln!(
                    out,
                    "{} {}",
                    self.paint(StyleRole::Header, "Help for Plugin:"),
                    self.paint(StyleRole::Key, plugin.name())
                )?;
                for command in &commands {
                    self.render_command(command, out)?;
                }
                Ok(())
            }
        }
    }

    fn render_command(&self, command: &CommandMetadata, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "Command: {}",
            self.paint(StyleRole::Literal, &command.command_name)
        )?;
        writeln!(out, "Description: {}", command.description)?;
        writeln!(out, "Parameters:")?;
        for parameter in &command.parameters {
            self.render_parameter(parameter, out)?;
        }
        Ok(())
    }

    fn render_parameter(&self, parameter: &Parameter, out: &mut dyn Write) -> io::Result<()> {
        let descriptor = &parameter.param_type;
        writeln!(
            out,
            "  {} ({})",
            self.paint(StyleRole::Placeholder, &parameter.name),
            descriptor.type_name()
        )?;
        if descriptor.is_discrete() {
            writeln!(out, "  Possible Values:")?;
            for value in descriptor.discrete_values() {
                writeln!(
                    out,
                    "    {} ({})",
                    self.paint(StyleRole::Value, &value.label),
                    value.ordinal
                )?;
            }
        }
        Ok(())
    }

    fn paint(&self, role: StyleRole, text: &str) -> String {
        role.paint(text, self.color)
    }
}

fn write_json<T: Serialize>(out: &mut dyn Write, document: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, document)?;
    writeln!(out)
}
