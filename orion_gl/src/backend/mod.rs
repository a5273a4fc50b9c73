//! Graphics backend abstraction
//!
//! The trait Orion drives, plus a recording mock for unit tests.

mod graphics_backend;

pub use graphics_backend::{BackendHandle, BackendResult, GraphicsBackend, ProcLoader, INVALID_HANDLE};

#[cfg(test)]
pub mod mock_backend;
