//! Integration tests for logging and error reporting
//!
//! Verifies that fatal errors, warnings and lifecycle events reach a
//! custom logger. No GL context required.
//!
//! Run with: cargo test --test logging_integration_tests

mod stub_backend;

use orion_gl::orion::log::{self, LogEntry, LogSeverity, Logger};
use orion_gl::orion::{BufferTarget, ErrorKind, Orion, OrionConfig, ShaderStage};
use serial_test::serial;
use std::sync::{Arc, Mutex};
use stub_backend::{ready_orion, StubBackend};

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn with_severity(entries: &Arc<Mutex<Vec<LogEntry>>>, severity: LogSeverity) -> Vec<String> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.severity == severity)
        .map(|e| e.message.clone())
        .collect()
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_fatal_error_is_logged_with_location() {
    let (logger, entries) = TestLogger::new();
    log::set_logger(logger);

    let mut orion = Orion::with_config(StubBackend::new(), OrionConfig::propagating());
    let err = orion.create_buffer(BufferTarget::Array).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotInitialised);

    {
        let captured = entries.lock().unwrap();
        let error = captured.iter().find(|e| e.severity == LogSeverity::Error).unwrap();
        assert!(error.message.contains("Error code 0x005 (ORERR_NOT_INIT) in `create_buffer`"));
        assert!(error.file.is_some());
        assert!(error.line.is_some());
    }

    log::reset_logger();
}

#[test]
#[serial]
fn test_compile_failure_is_a_warning() {
    let (logger, entries) = TestLogger::new();
    log::set_logger(logger);

    let mut orion = ready_orion(StubBackend::new(), 330);
    let shader = orion.create_shader().unwrap();
    assert!(!orion.add_shader_source(shader, ShaderStage::Vertex, "void nope").unwrap());

    let warnings = with_severity(&entries, LogSeverity::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("vertex stage failed to compile"));
    assert!(with_severity(&entries, LogSeverity::Error).is_empty());

    log::reset_logger();
}

#[test]
#[serial]
fn test_lifecycle_events_are_logged() {
    let (logger, entries) = TestLogger::new();
    log::set_logger(logger);

    let mut orion = ready_orion(StubBackend::new(), 460);
    orion.create_buffer(BufferTarget::Array).unwrap();
    orion.terminate().unwrap();

    let info = with_severity(&entries, LogSeverity::Info);
    assert!(info.iter().any(|m| m.contains("initialised with OpenGL 4.6")));
    assert!(info.iter().any(|m| m.contains("terminated")));
    let debug = with_severity(&entries, LogSeverity::Debug);
    assert!(debug.iter().any(|m| m.contains("1 resource(s) released")));

    log::reset_logger();
}
