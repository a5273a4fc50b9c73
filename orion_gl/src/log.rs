//! Orion message log
//!
//! Every lifecycle event, warning and fatal error record Orion produces goes
//! through one process-wide [`Logger`]. The slot starts out holding
//! [`DefaultLogger`] and can be swapped at any time with [`set_logger`].
//! Errors carry the file and line of the `orion_error!` call site.

use colored::*;
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use chrono::{DateTime, Local};

static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Destination for Orion's messages
///
/// # Example
///
/// ```no_run
/// use orion_gl::orion::log::{Logger, LogEntry, LogSeverity};
///
/// struct WarningsOnly;
///
/// impl Logger for WarningsOnly {
///     fn log(&self, entry: &LogEntry) {
///         if entry.severity >= LogSeverity::Warn {
///             eprintln!("{}: {}", entry.source, entry.message);
///         }
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// One message handed to the installed [`Logger`]
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Emitting component, `orion::Orion` for the facade, `orion::glow` for the glow backend
    pub source: String,
    pub message: String,
    /// Call site, set by `orion_error!` only
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

/// Severity, ordered from noisiest to most serious
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    Trace,
    /// Resource creation and release, registry sweeps
    Debug,
    /// Initialise and terminate
    Info,
    /// Soft failures; Orion keeps running
    Warn,
    /// Fatal error records
    Error,
}

impl LogSeverity {
    /// Fixed-width tag used by [`DefaultLogger`]
    pub fn tag(self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }

    fn paint(self) -> ColoredString {
        let tag = self.tag();
        match self {
            LogSeverity::Trace => tag.dimmed(),
            LogSeverity::Debug => tag.cyan(),
            LogSeverity::Info => tag.green(),
            LogSeverity::Warn => tag.yellow(),
            LogSeverity::Error => tag.red().bold(),
        }
    }
}

/// Local wall-clock time with milliseconds
fn stamp(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// `file:line` suffix, when the entry carries one
fn call_site(entry: &LogEntry) -> Option<String> {
    match (entry.file, entry.line) {
        (Some(file), Some(line)) => Some(format!("{}:{}", file, line)),
        _ => None,
    }
}

/// Stdout logger installed until [`set_logger`] replaces it
///
/// Prints `[stamp] [TAG  ] [source] message`, followed by ` (file:line)`
/// for error records.
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let mut line = format!(
            "[{}] [{}] [{}] {}",
            stamp(entry.timestamp),
            entry.severity.paint(),
            entry.source.as_str().bright_blue(),
            entry.message
        );
        if let Some(site) = call_site(entry) {
            line.push_str(&format!(" ({})", site));
        }
        println!("{}", line);
    }
}

// ===== LOGGER SLOT =====

fn logger_slot() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Replace the process-wide logger
pub fn set_logger<L: Logger + 'static>(logger: L) {
    if let Ok(mut lock) = logger_slot().write() {
        *lock = Box::new(logger);
    }
}

/// Reset the process-wide logger to [`DefaultLogger`]
pub fn reset_logger() {
    if let Ok(mut lock) = logger_slot().write() {
        *lock = Box::new(DefaultLogger);
    }
}

/// Log a message without file:line information
///
/// Used by the `orion_trace!` .. `orion_warn!` macros.
pub fn log(severity: LogSeverity, source: &str, message: String) {
    if let Ok(lock) = logger_slot().read() {
        lock.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }
}

/// Log a message with file:line information
///
/// Used by the `orion_error!` macro.
pub fn log_detailed(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: &'static str,
    line: u32,
) {
    if let Ok(lock) = logger_slot().read() {
        lock.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
#[macro_export]
macro_rules! orion_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
///
/// # Example
///
/// ```no_run
/// orion_gl::orion_debug!("orion::Registry", "Swept {} resources", 3);
/// ```
#[macro_export]
macro_rules! orion_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! orion_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! orion_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! orion_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
