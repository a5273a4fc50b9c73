/*!
# Orion GL

Resource lifecycle and error reporting layer over OpenGL.

Orion wraps backend handles (buffers, vertex arrays, shader programs) in
managed resources, tracks every live resource in a registry so teardown can
release them in one sweep, caches uniform locations per shader and routes
every failure through a single error reporter built on a fixed error
taxonomy.

## Architecture

- **Orion**: context object owning process state, registry and backend
- **GraphicsBackend**: trait with the raw graphics API calls Orion makes
- **Registry**: generation-checked slot map of managed resources
- **ErrorReporter**: fatal errors abort (default) or propagate, warnings log
- **DebugFilter**: write-once gate for backend debug messages

Backend implementations live in separate crates
(`orion_gl_backend_glow` for OpenGL through `glow`).
*/

// Internal modules
mod error;
mod config;
mod context;
mod reporter;
mod version;
pub mod log;
pub mod backend;
pub mod debug;
pub mod resource;

// Main orion namespace module
pub mod orion {
    // Error types
    pub use crate::error::{Error, ErrorKind, Result};

    // Context facade and configuration
    pub use crate::context::Orion;
    pub use crate::config::OrionConfig;
    pub use crate::version::{GlProfile, GlVersion};

    // Error reporting and callbacks
    pub use crate::reporter::{
        DebugMessageCallback, DefaultDebugMessageCallback, DefaultIntegrationErrorCallback,
        ErrorRecord, ErrorReporter, FatalPolicy, IntegrationErrorCallback,
    };

    // Backend trait
    pub use crate::backend::{BackendHandle, BackendResult, GraphicsBackend, ProcLoader, INVALID_HANDLE};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger, reset_logger, set_logger};
    }

    // Debug output sub-module
    pub mod debug {
        pub use crate::debug::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Frequently used resource types
    pub use crate::resource::{
        BufferKey, BufferTarget, BufferUsage, CompileOutcome, ShaderKey, ShaderStage,
        UniformLocation, UniformValue, VertexArrayKey, VertexAttribute,
    };
    pub use crate::debug::{DebugFilterConfig, DebugMessage};
}

// Re-export math library at crate root
pub use glam;
