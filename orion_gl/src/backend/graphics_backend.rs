/// GraphicsBackend trait - the calls Orion makes into the graphics API

use std::ffi::c_void;

use crate::debug::{DebugFilter, DebugHook};
use crate::resource::{BufferTarget, BufferUsage, ShaderStage, UniformValue, VertexAttribute};

/// Opaque handle issued by the graphics API
pub type BackendHandle = u32;

/// Sentinel for "no handle" (never allocated, or already released)
pub const INVALID_HANDLE: BackendHandle = 0;

/// Result of a fallible backend call; the error is the backend's own message
/// (allocation failure text, shader info log, program info log).
pub type BackendResult<T> = std::result::Result<T, String>;

/// Function-pointer loader handed to [`GraphicsBackend::load`]
pub type ProcLoader<'a> = &'a mut dyn FnMut(&str) -> *const c_void;

/// Graphics backend capability
///
/// One-to-one wrappers around the graphics API. Orion owns all validation,
/// bookkeeping and error policy; implementations only translate calls.
/// Every method except `load` may assume `load` returned `true`.
pub trait GraphicsBackend {
    /// Bind API function pointers through `loader`.
    ///
    /// Returns `false` when the loaded function set is unusable.
    /// May be called more than once.
    fn load(&mut self, loader: ProcLoader<'_>) -> bool;

    // ===== BUFFERS =====

    /// Allocate a buffer object for `target`
    fn create_buffer(&mut self, target: BufferTarget) -> BackendResult<BackendHandle>;

    /// Release a buffer object
    fn delete_buffer(&mut self, handle: BackendHandle);

    /// Bind a buffer object to `target`
    fn bind_buffer(&mut self, target: BufferTarget, handle: BackendHandle);

    /// Buffer currently bound to `target`, `INVALID_HANDLE` if none
    fn bound_buffer(&mut self, target: BufferTarget) -> BackendHandle;

    /// (Re)allocate the data store of the buffer bound to `target` and fill it
    /// with `data`. `handle` is the buffer Orion bound there.
    fn buffer_data(&mut self, target: BufferTarget, handle: BackendHandle, data: &[u8], usage: BufferUsage);

    /// Overwrite part of the data store of the buffer bound to `target`
    fn buffer_sub_data(&mut self, target: BufferTarget, handle: BackendHandle, offset: usize, data: &[u8]);

    /// [`buffer_data`](Self::buffer_data) through direct state access (OpenGL 4.5).
    /// No binding is read or changed.
    fn named_buffer_data(&mut self, handle: BackendHandle, data: &[u8], usage: BufferUsage);

    /// [`buffer_sub_data`](Self::buffer_sub_data) through direct state access (OpenGL 4.5)
    fn named_buffer_sub_data(&mut self, handle: BackendHandle, offset: usize, data: &[u8]);

    // ===== VERTEX ARRAYS =====

    /// Allocate a vertex array object
    fn create_vertex_array(&mut self) -> BackendResult<BackendHandle>;

    /// Release a vertex array object
    fn delete_vertex_array(&mut self, handle: BackendHandle);

    /// Bind a vertex array object
    fn bind_vertex_array(&mut self, handle: BackendHandle);

    /// Describe and enable one vertex attribute of `vertex_array`, sourcing from `buffer`
    fn vertex_attrib_pointer(&mut self, vertex_array: BackendHandle, buffer: BackendHandle, attribute: &VertexAttribute);

    // ===== SHADERS =====

    /// Allocate a program object
    fn create_program(&mut self) -> BackendResult<BackendHandle>;

    /// Release a program object
    fn delete_program(&mut self, handle: BackendHandle);

    /// Make a program current
    fn use_program(&mut self, handle: BackendHandle);

    /// Allocate a shader stage object
    fn create_stage(&mut self, stage: ShaderStage) -> BackendResult<BackendHandle>;

    /// Upload source to a stage object and compile it; `Err` carries the info log
    fn compile_stage(&mut self, handle: BackendHandle, source: &str) -> BackendResult<()>;

    /// Release a shader stage object
    fn delete_stage(&mut self, handle: BackendHandle);

    /// Attach a compiled stage to a program
    fn attach_stage(&mut self, program: BackendHandle, stage: BackendHandle);

    /// Link a program; `Err` carries the info log
    fn link_program(&mut self, program: BackendHandle) -> BackendResult<()>;

    /// Location of the uniform `name`, `None` if the program has no such active uniform
    fn uniform_location(&mut self, program: BackendHandle, name: &str) -> Option<i32>;

    /// Set a uniform value on `program`
    fn set_uniform(&mut self, program: BackendHandle, location: i32, value: &UniformValue);

    // ===== DEBUG OUTPUT =====

    /// Enable debug output and route every debug event to `hook`.
    ///
    /// `filter` is given so the backend can pre-filter at the API level;
    /// Orion applies the same filter again before forwarding.
    fn install_debug_hook(&mut self, filter: &DebugFilter, hook: DebugHook);
}
