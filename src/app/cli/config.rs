//! TOML configuration file parsing and loading
//!
//! Settings are resolved from three layers: command line, configuration file
//! and built-in defaults, in that order of precedence. Plugin exclusions are
//! the exception; exclusions from the file and the command line are merged.

use super::args::{parse_comma_separated_strings, Args};
use crate::core::error_handling::ContextualError;
use crate::core::logging::{LogFormat, LOG_LEVELS};
use crate::core::strings::title_case;
use crate::plugin::api::OutputFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Plugin directory used when neither command line nor config names one
pub const DEFAULT_PLUGIN_DIR: &str = "plugins";

const APP_NAME: &str = "plughost";

/// Configuration file contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    pub plugin_dir: Option<PathBuf>,
    pub exclude_plugin: Option<StringOrList>,
    pub format: Option<String>,
    pub color: Option<bool>,
    pub no_color: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<String>,
}

/// A key that accepts either `key = "a,b"` or `key = ["a", "b"]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    fn to_vec(&self) -> Vec<String> {
        match self {
            StringOrList::One(value) => vec![value.clone()],
            StringOrList::Many(values) => values.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value '{value}' for '{key}' in {origin}; expected one of: {expected}")]
    InvalidValue {
        origin: String,
        key: String,
        value: String,
        expected: String,
    },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ConfigError::Read { .. })
    }

    fn user_message(&self) -> Option<String> {
        self.is_user_actionable().then(|| self.to_string())
    }
}

/// `<config_dir>/Plughost/plughost.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(title_case(APP_NAME))
            .join(format!("{}.toml", APP_NAME))
    })
}

impl ConfigFile {
    /// Load the configuration file
    ///
    /// An explicitly named file must exist. Without one, the default location
    /// is used when a file is present there. Returns the path that was read
    /// alongside its contents.
    pub fn load(explicit: Option<&Path>) -> Result<Option<(PathBuf, ConfigFile)>, ConfigError> {
        let path = match explicit {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.is_file() => path,
                _ => return Ok(None),
            },
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&path, &contents)?;
        Ok(Some((path, config)))
    }

    /// Parse and validate configuration text read from `path`
    pub fn parse(path: &Path, contents: &str) -> Result<ConfigFile, ConfigError> {
        let config: ConfigFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let origin = path.display().to_string();
        if let Some(format) = &config.format {
            parse_choice::<OutputFormat>(&origin, "format", format)?;
        }
        if let Some(log_format) = &config.log_format {
            parse_choice::<LogFormat>(&origin, "log-format", log_format)?;
        }
        if let Some(level) = &config.log_level {
            check_log_level(&origin, level)?;
        }
        Ok(config)
    }

    fn exclusions(&self) -> Vec<String> {
        self.exclude_plugin
            .as_ref()
            .map(StringOrList::to_vec)
            .unwrap_or_default()
    }

    fn log_file(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .filter(|file| !file.eq_ignore_ascii_case("none") && *file != "-")
            .map(PathBuf::from)
    }

    /// Color preference: `no-color = true` wins over `color`
    fn color(&self) -> Option<bool> {
        match (self.no_color, self.color) {
            (Some(true), _) => Some(false),
            (_, Some(color)) => Some(color),
            (Some(false), None) => Some(true),
            (None, None) => None,
        }
    }
}

/// Fully resolved host settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub plugin_dir: PathBuf,
    pub excluded_plugins: Vec<String>,
    pub format: OutputFormat,
    pub color: bool,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
    pub log_file: Option<PathBuf>,
    pub verbosity: i8,
    pub invocation: Vec<String>,
}

impl Settings {
    /// Merge command line and configuration file over the defaults
    ///
    /// Color comes from `--color`/`--no-color`, then `NO_COLOR`/`FORCE_COLOR`,
    /// then the config file, and finally `stdout_is_terminal`.
    pub fn resolve(
        args: &Args,
        config: Option<&ConfigFile>,
        stdout_is_terminal: bool,
    ) -> Result<Self, ConfigError> {
        let default_config = ConfigFile::default();
        let config = config.unwrap_or(&default_config);
        let origin = "command line";

        let plugin_dir = args
            .plugin_dir
            .clone()
            .or_else(|| config.plugin_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PLUGIN_DIR));

        let mut exclusions = config.exclusions();
        exclusions.extend(args.plugin_exclusions());
        let excluded_plugins = parse_comma_separated_strings(&exclusions);

        let format = match (&args.format, &config.format) {
            (Some(format), _) => parse_choice(origin, "--format", format)?,
            (None, Some(format)) => parse_choice("configuration file", "format", format)?,
            (None, None) => OutputFormat::default(),
        };

        let color = if args.color {
            true
        } else if args.no_color {
            false
        } else {
            env_color()
                .or_else(|| config.color())
                .unwrap_or(stdout_is_terminal)
        };

        let log_level = args.log_level.clone().or_else(|| config.log_level.clone());
        if let Some(level) = &log_level {
            check_log_level(origin, level)?;
        }

        let log_format = match (&args.log_format, &config.log_format) {
            (Some(format), _) => parse_choice(origin, "--log-format", format)?,
            (None, Some(format)) => parse_choice("configuration file", "log-format", format)?,
            (None, None) => LogFormat::default(),
        };

        let log_file = match &args.log_file {
            Some(_) => args.log_file(),
            None => config.log_file(),
        };

        Ok(Settings {
            plugin_dir,
            excluded_plugins,
            format,
            color,
            log_level,
            log_format,
            log_file,
            verbosity: args.verbosity(),
            invocation: args.invocation.clone(),
        })
    }
}

/// Color preference from the environment; `NO_COLOR` wins over `FORCE_COLOR`
fn env_color() -> Option<bool> {
    if std::env::var_os("NO_COLOR").is_some() {
        Some(false)
    } else if std::env::var_os("FORCE_COLOR").is_some() {
        Some(true)
    } else {
        None
    }
}

fn parse_choice<T>(origin: &str, key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + strum::IntoEnumIterator + AsRef<str>,
{
    T::from_str(value).map_err(|_| ConfigError::InvalidValue {
        origin: origin.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        expected: T::iter()
            .map(|choice| choice.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn check_log_level(origin: &str, level: &str) -> Result<(), ConfigError> {
    if LOG_LEVELS.iter().any(|known| known.eq_ignore_ascii_case(level)) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            origin: origin.to_string(),
            key: "log-level".to_string(),
            value: level.to_string(),
            expected: LOG_LEVELS.join(", "),
        })
    }
}
