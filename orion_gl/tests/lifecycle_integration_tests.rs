//! Integration tests for the resource lifecycle
//!
//! Drives a full initialise → load → create → upload → terminate cycle
//! against the stub backend. No GL context required.
//!
//! Run with: cargo test --test lifecycle_integration_tests

mod stub_backend;

use orion_gl::orion::{BufferTarget, BufferUsage, ErrorKind, GlProfile, Orion, OrionConfig, VertexAttribute};
use std::process::Command;
use stub_backend::{ready_orion, StubBackend};

// ============================================================================
// Buffer round trip
// ============================================================================

#[test]
fn test_buffer_upload_and_teardown() {
    let mut orion = ready_orion(StubBackend::new(), 460);

    let buffer = orion.create_buffer(BufferTarget::Array).unwrap();
    assert!(orion.registry().contains(buffer.raw()));

    orion.set_buffer_data(buffer, &[0u8; 64], BufferUsage::StaticDraw).unwrap();
    orion.terminate().unwrap();

    let backend = orion.backend();
    assert_eq!(backend.count("create_buffer"), 1);
    assert_eq!(backend.count("named_buffer_data"), 1);
    assert_eq!(backend.count("bind_buffer"), 0);
    assert_eq!(backend.uploads, vec![(1, 64)]);
    assert_eq!(backend.count("delete_buffer"), 1);
    assert_eq!(backend.live(), 0);
    assert!(orion.registry().is_empty());
}

#[test]
fn test_buffer_upload_before_dsa_binds_and_restores() {
    let mut orion = ready_orion(StubBackend::new(), 330);
    let buffer = orion.create_buffer(BufferTarget::ElementArray).unwrap();

    orion.set_buffer_data(buffer, &[0u8; 12], BufferUsage::StaticDraw).unwrap();
    orion.set_buffer_data(buffer, &[1u8; 12], BufferUsage::StaticDraw).unwrap();

    let backend = orion.backend();
    assert_eq!(backend.count("bound_buffer"), 2);
    assert_eq!(backend.count("bind_buffer"), 4);
    assert_eq!(backend.count("buffer_data"), 1);
    assert_eq!(backend.count("buffer_sub_data"), 1);
    assert_eq!(backend.count("named_buffer_data"), 0);
}

#[test]
fn test_every_resource_is_swept_once() {
    let mut orion = ready_orion(StubBackend::new(), 330);

    let vertices = orion.create_buffer(BufferTarget::Array).unwrap();
    let indices = orion.create_buffer(BufferTarget::ElementArray).unwrap();
    let vertex_array = orion.create_vertex_array().unwrap();
    let shader = orion.create_shader().unwrap();
    orion.specify_vertex_data(vertex_array, vertices, VertexAttribute::float(0, 3)).unwrap();
    orion.free_buffer(indices).unwrap();

    for key in [vertices.raw(), vertex_array.raw(), shader.raw()] {
        assert!(orion.registry().contains(key));
    }
    assert_eq!(orion.registry().len(), 3);

    orion.terminate().unwrap();

    let backend = orion.backend();
    assert_eq!(backend.count("delete_buffer"), 2);
    assert_eq!(backend.count("delete_vertex_array"), 1);
    assert_eq!(backend.count("delete_program"), 1);
    assert_eq!(backend.live(), 0);
}

#[test]
fn test_freed_key_stays_dead_across_reuse() {
    let mut orion = ready_orion(StubBackend::new(), 460);
    let first = orion.create_buffer(BufferTarget::Array).unwrap();
    orion.free_buffer(first).unwrap();
    let second = orion.create_buffer(BufferTarget::Array).unwrap();

    assert_eq!(orion.bind_buffer(first).unwrap_err().kind(), ErrorKind::AccessPhantom);
    assert!(orion.bind_buffer(second).is_ok());
}

// ============================================================================
// Fatal path
// ============================================================================

#[test]
fn test_bind_before_initialise_propagates() {
    let mut orion = Orion::with_config(StubBackend::new(), OrionConfig::propagating());
    let err = orion.bind_buffer(Default::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotInitialised);
    assert_eq!(err.label(), "ORERR_NOT_INIT");
}

/// Runs only inside the child process spawned by `test_bind_before_initialise_aborts`
#[test]
fn abort_child_process() {
    if std::env::var_os("ORION_ABORT_CHILD").is_none() {
        return;
    }
    let mut orion = Orion::new(StubBackend::new());
    let _ = orion.bind_buffer(Default::default());
    unreachable!("the default policy aborts");
}

#[test]
fn test_bind_before_initialise_aborts() {
    let exe = std::env::current_exe().unwrap();
    let output = Command::new(exe)
        .args(["--exact", "abort_child_process", "--nocapture", "--test-threads=1"])
        .env("ORION_ABORT_CHILD", "1")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[Orion : FATAL!] >> Error code 0x005 (ORERR_NOT_INIT)"), "stdout: {}", stdout);
}

#[test]
fn test_initialise_twice_fails_every_version() {
    for version in [110, 120, 121, 130, 150, 200, 210, 300, 310, 320, 330, 400, 410, 420, 430, 440, 450, 460] {
        let mut orion = Orion::with_config(StubBackend::new(), OrionConfig::propagating());
        orion.initialise(version, GlProfile::Core).unwrap();
        let err = orion.initialise(version, GlProfile::Core).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MultipleCalls, "version {}", version);
    }
}
