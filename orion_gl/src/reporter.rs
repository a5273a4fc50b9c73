//! Error reporting and error-sink callbacks
//!
//! Every fatal error and every warning the library raises goes through
//! [`ErrorReporter`]. It formats an [`ErrorRecord`], hands it to the logger
//! and then either aborts the process or gives the error back, depending on
//! the configured [`FatalPolicy`].
//!
//! Messages that originate outside the library (backend debug events,
//! windowing errors) are delivered to replaceable callback objects.

use std::fmt;
use std::sync::Arc;

use crate::debug::{DebugMessage, DebugSeverity, DebugSource, DebugType};
use crate::error::{Error, ErrorKind, Result};
use crate::{orion_debug, orion_error, orion_info, orion_warn};

/// What a fatal error does once reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalPolicy {
    /// Print the record to stdout and abort the process
    Abort,
    /// Return the error to the caller
    Propagate,
}

impl Default for FatalPolicy {
    fn default() -> Self {
        FatalPolicy::Abort
    }
}

/// Formatted view of one error, alive only while it is being emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub code: u16,
    pub message: &'static str,
    pub label: &'static str,
    /// Failing call and detail
    pub context: String,
}

impl ErrorRecord {
    pub fn from_error(error: &Error) -> Self {
        let kind = error.kind();
        Self {
            code: kind.code(),
            message: kind.message(),
            label: kind.label(),
            context: error.context().to_string(),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error code 0x{:03X} ({}) in `{}`: {}",
            self.code, self.label, self.context, self.message
        )
    }
}

/// Single reporting path for errors and warnings
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorReporter {
    policy: FatalPolicy,
}

impl ErrorReporter {
    pub fn new(policy: FatalPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FatalPolicy {
        self.policy
    }

    /// Report a fatal error
    ///
    /// Under [`FatalPolicy::Abort`] this never returns.
    pub fn throw_error(&self, error: Error) -> Error {
        let record = ErrorRecord::from_error(&error);
        orion_error!("orion::Orion", "{}", record);

        if self.policy == FatalPolicy::Abort {
            println!("[Orion : FATAL!] >> {}", record);
            std::process::abort();
        }
        error
    }

    /// Report a non-fatal condition; execution continues
    pub fn throw_warning(&self, error: &Error) {
        let record = ErrorRecord::from_error(error);
        orion_warn!("orion::Orion", "{}", record);
    }
}

// ===== CALLBACKS =====

/// Receives backend debug events that passed the debug filter
pub trait DebugMessageCallback: Send + Sync {
    fn on_message(&self, message: &DebugMessage);
}

/// Receives errors from the windowing/integration layer
///
/// Returning `Err` makes the error fatal; returning `Ok` means the callback
/// recovered.
pub trait IntegrationErrorCallback: Send + Sync {
    fn on_error(&self, code: i32, message: &str) -> Result<()>;
}

/// Logs debug events, mapping the debug severity onto a log severity
pub struct DefaultDebugMessageCallback;

impl DebugMessageCallback for DefaultDebugMessageCallback {
    fn on_message(&self, message: &DebugMessage) {
        let source = message.source().map_or("UNKNOWN", DebugSource::name);
        let kind = message.kind().map_or("UNKNOWN", DebugType::name);
        let severity = message.severity();
        let severity_name = severity.map_or("UNKNOWN", DebugSeverity::name);

        let line = format!(
            "GL message {} : source {} : type {} : severity {} : \"{}\"",
            message.id, source, kind, severity_name, message.text
        );

        match severity {
            Some(DebugSeverity::High) => orion_error!("orion::Debug", "{}", line),
            Some(DebugSeverity::Medium) => orion_warn!("orion::Debug", "{}", line),
            Some(DebugSeverity::Low) => orion_info!("orion::Debug", "{}", line),
            _ => orion_debug!("orion::Debug", "{}", line),
        }
    }
}

/// Logs the integration error and declares it unrecoverable
pub struct DefaultIntegrationErrorCallback;

impl IntegrationErrorCallback for DefaultIntegrationErrorCallback {
    fn on_error(&self, code: i32, message: &str) -> Result<()> {
        orion_warn!("orion::Orion", "Error received from the windowing layer (code {}): \"{}\"", code, message);
        Err(Error::new(
            ErrorKind::GlfwFail,
            format!("windowing layer error {}: {}", code, message),
        ))
    }
}

/// The installed error-sink callbacks
#[derive(Clone)]
pub(crate) struct Callbacks {
    pub(crate) debug: Arc<dyn DebugMessageCallback>,
    pub(crate) integration: Arc<dyn IntegrationErrorCallback>,
}

impl Default for Callbacks {
    fn default() -> Self {
        Self {
            debug: Arc::new(DefaultDebugMessageCallback),
            integration: Arc::new(DefaultIntegrationErrorCallback),
        }
    }
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
