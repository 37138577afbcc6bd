//! Logging setup
//!
//! The host logs through the `log` facade with `flexi_logger` as backend.
//! Diagnostics (module load failures, dispatch tracing) go to stderr so they
//! never mix with command output on stdout; a log file can be added.

use flexi_logger::{DeferredNow, FileSpec, Logger, LoggerHandle};
use std::io::Write;
use std::sync::{Mutex, OnceLock};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Log line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// `YYYY-MM-DD HH:MM:SS.mmm LVL message`
    #[default]
    Text,
    /// Text plus the emitting module and line
    Ext,
    /// One JSON object per line
    Json,
}

/// Level names accepted by `--log-level`
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

// Global logger handle, kept so the level can be adjusted after startup
static LOGGER_HANDLE: OnceLock<Mutex<LoggerHandle>> = OnceLock::new();

pub fn init_logging(
    log_level: Option<&str>,
    log_format: LogFormat,
    log_file: Option<&std::path::Path>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level_str = log_level.unwrap_or("warn");

    let mut logger = Logger::try_with_str(level_str)?;

    logger = match (log_format, color_enabled) {
        (LogFormat::Json, _) => logger.format(json_format),
        (LogFormat::Ext, true) => logger.format(extended_color_format),
        (LogFormat::Ext, false) => logger.format(extended_format),
        (LogFormat::Text, true) => logger.format(simple_color_format),
        (LogFormat::Text, false) => logger.format(simple_format),
    };

    // Configure file output if requested
    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(file_path)?;
        logger = logger
            .log_to_file(file_spec)
            .duplicate_to_stderr(flexi_logger::Duplicate::All);
    }

    let handle = logger.start()?;
    if LOGGER_HANDLE.set(Mutex::new(handle)).is_err() {
        return Err("Logger is already initialised".into());
    }

    Ok(())
}

/// Shift the active log level by a verbosity delta (`-v` positive, `-q` negative)
///
/// Only the level can change at runtime; format and file are fixed by `init_logging`.
pub fn set_logging_level(base_level: Option<&str>, verbosity: i8) -> Result<(), Box<dyn std::error::Error>> {
    if verbosity == 0 {
        return Ok(());
    }
    let level = adjusted_level(base_level.unwrap_or("warn"), verbosity);
    let handle_mutex = LOGGER_HANDLE
        .get()
        .ok_or("Logger handle not initialised. Call init_logging first.")?;
    let mut handle = handle_mutex
        .lock()
        .map_err(|_| "Could not acquire logger handle lock")?;
    handle.parse_and_push_temp_spec(level)?;
    Ok(())
}

/// Level name `verbosity` steps away from `base`, clamped to trace..off
pub fn adjusted_level(base: &str, verbosity: i8) -> &'static str {
    // LOG_LEVELS runs from most to least verbose
    let index = LOG_LEVELS
        .iter()
        .position(|level| level.eq_ignore_ascii_case(base))
        .unwrap_or(3) as i16;
    let adjusted = (index - verbosity as i16).clamp(0, LOG_LEVELS.len() as i16 - 1);
    LOG_LEVELS[adjusted as usize]
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn level_colored(level: log::Level) -> colored::ColoredString {
    use colored::Colorize;

    let abbr = level_abbr(level);
    match level {
        log::Level::Error => abbr.red().bold(),
        log::Level::Warn => abbr.yellow(),
        log::Level::Info => abbr.green(),
        log::Level::Debug => abbr.blue(),
        log::Level::Trace => abbr.magenta(),
    }
}

// Format: "YYYY-MM-DD HH:mm:ss.fff WRN message"
fn simple_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

fn simple_color_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args()
    )
}

// Format: "YYYY-MM-DD HH:mm:ss.fff WRN message (plugin/discovery.rs:42)"
fn extended_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn extended_color_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line()).dimmed()
    )
}

// JSON timestamps are always UTC
fn json_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use serde_json::json;

    // Ordered: timestamp, level, message, metadata
    let json_obj = json!({
        "timestamp": chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_abbr(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line())
    });

    match serde_json::to_string(&json_obj) {
        Ok(json_string) => w.write_all(json_string.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

// plughost::plugin::discovery -> plugin/discovery.rs:<line>
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = if let Some(without_prefix) = target.strip_prefix("plughost::") {
        without_prefix.replace("::", "/") + ".rs"
    } else {
        target.replace("::", "/")
    };

    if let Some(line_num) = line {
        format!("{}:{}", path_like, line_num)
    } else {
        path_like
    }
}
